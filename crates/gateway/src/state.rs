//! Shared application state for the gateway

use std::sync::Arc;

use flatseller_auth::{AuthError, Authenticator, Identity};
use flatseller_housing::{FlatService, HouseService};

/// Services handed to every request handler
#[derive(Clone)]
pub struct GatewayState {
    authenticator: Arc<Authenticator>,
    flats: FlatService,
    houses: HouseService,
}

impl GatewayState {
    pub fn new(authenticator: Authenticator, flats: FlatService, houses: HouseService) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            flats,
            houses,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn flats(&self) -> &FlatService {
        &self.flats
    }

    pub fn houses(&self) -> &HouseService {
        &self.houses
    }

    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.authenticator.authenticate_token(token)
    }
}
