//! `petsd`: pets HTTP service
//!
//! ```bash
//! PETS_SERVICE__PORT=9000 PETS_SERVICE__LOG_LEVEL=debug petsd
//! ```

use pets_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    Application::load()?.run().await
}
