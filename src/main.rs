#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = verilearn_api::run().await {
        eprintln!("verilearn-api fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
