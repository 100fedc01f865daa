#[tokio::main]
async fn main() -> anyhow::Result<()> {
    farmland_lib::run().await
}
