#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexibox_backend::run().await
}
