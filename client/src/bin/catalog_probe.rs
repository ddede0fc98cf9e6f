//! 目录探测工具
//!
//! 加载配置,列出后端商品,用于确认API地址与图片主机配置正确。
//! 用法: `catalog-probe [productor_id]`

use saborlocal_client::services::ConfigService;
use saborlocal_client::utils::logger;
use saborlocal_client::{ApiResult, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigService::load_app_config()?;
    let _guard = logger::init(&config.log_dir)?;

    let state = AppState::new(config).await?;
    let productor_id = std::env::args().nth(1);

    let result = match productor_id.as_deref() {
        Some(id) => state.productos.get_productos_by_productor(id).await,
        None => state.productos.get_productos().await,
    };

    match result {
        ApiResult::Success { data } => {
            println!("✓ {} productos", data.len());
            for producto in data {
                println!(
                    "  {} | {} | {:.0} / {} | stock {} | {}",
                    producto.id,
                    producto.nombre,
                    producto.precio,
                    producto.unidad,
                    producto.stock,
                    producto.imagen.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        ApiResult::Error { message, cause } => {
            eprintln!("✗ {}", message);
            if let Some(cause) = cause {
                eprintln!("  原因: {}", cause);
            }
            std::process::exit(1);
        }
    }
}
