use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::seq::SliceRandom;
use rand::Rng;
use rdiffuse::{models, AtomKind, DiffusionConfig, ImageGenerationRequest, SdApiClient};
use std::env;
use std::fs;

const SUBJECTS: &[&str] = &[
    "arctic fox",
    "humpback whale",
    "snow leopard",
    "octopus",
    "peregrine falcon",
    "spiral galaxy",
    "supernova remnant",
    "binary pulsar",
    "nebula",
    "black hole accretion disk",
];

const ATOMS: &[AtomKind] = &[
    AtomKind::Hydrogen,
    AtomKind::Helium,
    AtomKind::Lithium,
    AtomKind::Carbon,
    AtomKind::Oxygen,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    rdiffuse::logger::init_with_config(
        rdiffuse::logger::LoggerConfig::development()
            .with_level(rdiffuse::logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking generation API environment...");

    match env::var("SDAPI_KEY") {
        Ok(key) => {
            log::info!("✅ API key found in environment");
            log::debug!("Key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  No SDAPI_KEY in environment variables");
            log::error!("❌ Generation requests will likely be rejected");
        }
    }

    if let Ok(base) = env::var("SDAPI_BASE_URL") {
        log::info!("SDAPI_BASE_URL: {}", base);
    }

    let config = DiffusionConfig::from_env();
    rdiffuse::logger::log_config_info(&config);

    log::info!("🔄 Creating generation client...");
    let client = match SdApiClient::new(config) {
        Ok(client) => {
            log::info!("✅ Generation client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize generation client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available image generation models:");
    for (id, name, provider) in rdiffuse::ImageClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }

    let mut rng = rand::thread_rng();
    let subject = SUBJECTS.choose(&mut rng).copied().unwrap_or("arctic fox");
    let atom = ATOMS.choose(&mut rng).copied().unwrap_or(AtomKind::Hydrogen);
    let wavelength = rng.gen_range(0.5..2.0);
    let amplitude = rng.gen_range(0.5..2.0);

    log::info!(
        "🎨 Collapsing a {} atom into: {} (wavelength {:.2}, amplitude {:.2})",
        atom,
        subject,
        wavelength,
        amplitude
    );

    let request = ImageGenerationRequest {
        subject: subject.to_string(),
        atom,
        wavelength,
        amplitude,
        init_image: None,
        model_id: None,
        width: None,
        height: None,
    };

    let result = {
        let _timer = rdiffuse::logger::timer("image_generation");
        client.image().generate(request).await
    };

    match result {
        Ok(response) => {
            log::info!("✅ Image generation successful!");
            log::info!("🤖 Model used: {}", response.model);

            if let Some(payload) = models::inline_base64(&response.image) {
                let filename = format!("collapsed_{}.png", subject.replace(' ', "_"));
                match BASE64.decode(payload) {
                    Ok(image_bytes) => match fs::write(&filename, image_bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    },
                    Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
                }
            } else {
                log::info!("🔗 Image URL: {}", response.image);
                let filename = format!("collapsed_{}.png", subject.replace(' ', "_"));
                match client.image().download_image(&response.image).await {
                    Ok(bytes) => match fs::write(&filename, bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    },
                    Err(e) => log::warn!("⚠️  Could not download image: {}", e),
                }
            }
        }
        Err(e) => {
            log::error!("❌ Image generation failed: {}", e);
            log::warn!("💡 Check your API key and poll budget, then retry");
        }
    }

    log::info!("🎉 Done!");
    Ok(())
}
