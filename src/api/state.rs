use std::sync::Arc;

use crate::yield_calc::YieldCalculator;

#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<YieldCalculator>,
}

impl AppState {
    pub fn new(calculator: YieldCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }
}
