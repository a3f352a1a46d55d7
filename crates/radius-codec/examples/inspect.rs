use clap::Parser;
use radius_codec::{generate_authenticator, Attribute, CodecConfig, Code, Packet};
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Decode and print a RADIUS packet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius-inspect")]
struct Cli {
    /// Shared secret used for User-Password obfuscation
    #[arg(short, long, default_value = "testing123")]
    secret: String,

    /// Codec configuration file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Log filter, e.g. "debug" or "radius_codec=trace"
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hex-encoded packet; a sample Access-Request is built when omitted
    #[arg(value_name = "HEX")]
    packet: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    let dictionary = Arc::new(config.load_dictionary()?);
    let secret = cli.secret.as_bytes();

    let data = match &cli.packet {
        Some(text) => hex::decode(text.trim())?,
        None => {
            let mut sample = Packet::new(
                Code::AccessRequest,
                1,
                generate_authenticator()?,
                Arc::clone(&dictionary),
            );
            sample.add_attribute("User-Name", "alice")?;
            sample.add_attribute("User-Password", "password")?;
            sample.add_attribute("NAS-IP-Address", [127u8, 0, 0, 1])?;
            sample.push_attribute(Attribute::vendor_specific(9, 1, b"ciscoval")?);

            let encoded = sample.encode_with(secret, &config)?;
            info!("Built sample Access-Request: {}", hex::encode(&encoded));
            encoded
        }
    };

    let packet = Packet::decode_with(&data, secret, dictionary, &config)?;

    println!("{}", packet.header());
    for attr in &packet.attributes {
        let name = packet.dictionary().display_name(attr.attr_type);
        match attr.as_vendor_specific() {
            Some(vsa) => println!(
                "  {} (vendor {}, type {}): {}",
                name,
                vsa.vendor_id,
                vsa.vendor_type,
                String::from_utf8_lossy(vsa.payload)
            ),
            None => println!("  {}: {}", name, String::from_utf8_lossy(&attr.value)),
        }
    }

    Ok(())
}
