use rdiffuse::{AtomKind, DiffusionConfig, ImageGenerationRequest, SdApiClient};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    rdiffuse::logger::init()?;

    let api_key = env::var("SDAPI_KEY")?;
    let config = DiffusionConfig::new()
        .with_api_key(api_key)
        .with_model("midjourney")
        .with_size(512, 512);

    let client = SdApiClient::new(config)?;
    let request = ImageGenerationRequest {
        subject: "snow leopard".to_string(),
        atom: AtomKind::Oxygen,
        wavelength: 1.7,
        amplitude: 0.6,
        init_image: None,
        model_id: None,
        width: None,
        height: None,
    };

    let response = client.image().generate(request).await?;
    println!("{}", response.image);

    Ok(())
}
