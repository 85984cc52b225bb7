use rental_backend::run;

#[tokio::main]
async fn main() {
    run().await;
}
