#[tokio::main]
async fn main() -> anyhow::Result<()> {
    study_quest_server::run().await
}
