use std::sync::Arc;

use crate::application::listing::CachedListingFacade;
use crate::application::products::ProductService;
use crate::application::repos::StoreHealth;

#[derive(Clone)]
pub struct ApiState {
    pub listings: CachedListingFacade,
    pub products: Arc<ProductService>,
    pub store: Arc<dyn StoreHealth>,
}

impl ApiState {
    pub fn new(
        listings: CachedListingFacade,
        products: ProductService,
        store: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            listings,
            products: Arc::new(products),
            store,
        }
    }
}
