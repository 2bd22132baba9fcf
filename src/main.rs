#[tokio::main]
async fn main() {
    command::exec().await;
}
