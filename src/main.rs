use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    signup_gate::app::run().await
}
