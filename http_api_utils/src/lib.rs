pub use helpers::extend_router_with_middleware;
pub use misc::{Direction, ETH_CONSENSUS_VERSION};
pub use traits::ApiError;

pub mod logging;
pub mod middleware;

mod error;
mod helpers;
mod misc;
mod traits;
