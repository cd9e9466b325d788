#[tokio::main]
async fn main() {
    if let Err(err) = skillmap_bot::run().await {
        eprintln!("Error running bot: {}", err);
        std::process::exit(1);
    }
}
