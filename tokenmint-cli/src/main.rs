//! Tokenmint CLI
//!
//! Command-line interface for the tokenmint signing service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tokenmint_api::{ApiConfig, ApiServer};
use tokenmint_cache::{CacheConfig, CacheLayer};
use tokenmint_core::constants::{DEFAULT_ALGORITHM, DEFAULT_PORT};
use tokenmint_core::types::{Claims, SecretKey, SigningRequest};
use tokenmint_crypto::{derive_cache_key, hash_secret, JwtSigner};
use tokenmint_issuer::{is_cacheable, IssuerConfig, TokenIssuer};

/// Tokenmint - JWT signing service with a result cache
#[derive(Parser)]
#[command(name = "tokenmint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Redis connection string; in-memory cache when unset
        #[arg(long, env = "REDIS_URL")]
        redis_url: Option<String>,
    },

    /// Sign a token locally
    Sign {
        /// Signing key (HMAC secret or PEM private key)
        #[arg(short, long, env = "TOKENMINT_KEY", hide_env_values = true)]
        key: String,
        /// Claims as a JSON object
        #[arg(long, default_value = "{}")]
        body: String,
        /// Signing algorithm
        #[arg(short, long, default_value = DEFAULT_ALGORITHM)]
        algorithm: String,
        /// Do not inject an `exp` claim
        #[arg(long)]
        no_exp: bool,
    },

    /// Print the cache key a request would be stored under
    Fingerprint {
        /// Signing key
        #[arg(short, long, env = "TOKENMINT_KEY", hide_env_values = true)]
        key: String,
        /// Claims as a JSON object
        #[arg(long, default_value = "{}")]
        body: String,
        /// Signing algorithm
        #[arg(short, long, default_value = DEFAULT_ALGORITHM)]
        algorithm: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "tokenmint=debug,info"
    } else {
        "tokenmint=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match cli.command {
        Commands::Serve { port, bind, redis_url } => cmd_serve(port, &bind, redis_url).await,
        Commands::Sign { key, body, algorithm, no_exp } => {
            cmd_sign(key.into(), &body, &algorithm, !no_exp).await
        }
        Commands::Fingerprint { key, body, algorithm } => {
            cmd_fingerprint(key.into(), &body, &algorithm)
        }
    }
}

fn parse_body(raw: &str) -> Result<Claims> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Body is not valid JSON")?;
    match value {
        serde_json::Value::Object(claims) => Ok(claims),
        _ => bail!("Body must be a JSON object"),
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str, redis_url: Option<String>) -> Result<()> {
    println!("{}", "🚀 Starting tokenmint API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig::from_env().with_redis_url(redis_url);
    info!(
        port,
        bind,
        redis_configured = config.cache.redis_url.is_some(),
        cache_enabled = config.enable_cache,
        max_entries = config.cache.max_entries,
        "Starting tokenmint API server"
    );
    let server = ApiServer::new(config).await;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Sign one token without a server
async fn cmd_sign(key: SecretKey, body: &str, algorithm: &str, add_exp: bool) -> Result<()> {
    let payload = parse_body(body)?;

    let cache = CacheLayer::in_memory(&CacheConfig::default());
    let issuer = TokenIssuer::new(cache.backend(), Arc::new(JwtSigner), IssuerConfig::default());

    let request = SigningRequest::new(key, payload)
        .with_algorithm(algorithm)
        .with_add_expiration(add_exp);

    let issued = issuer.issue(request).await.context("Failed to sign token")?;
    debug!(algorithm, add_exp, "Signed token locally");
    println!("{}", issued.token);

    Ok(())
}

/// Builds the request the server would see, with the same algorithm fallback.
fn fingerprint_request(key: SecretKey, body: &str, algorithm: &str) -> Result<SigningRequest> {
    Ok(SigningRequest::new(key, parse_body(body)?)
        .with_algorithm(algorithm)
        .with_add_expiration(false)
        .normalize())
}

/// Show the cache key and secret fingerprint for a request
fn cmd_fingerprint(key: SecretKey, body: &str, algorithm: &str) -> Result<()> {
    let request = fingerprint_request(key, body, algorithm)?;
    let cache_key = derive_cache_key(&request.secret, &request.payload, &request.options.algorithm);

    println!("{}", "🔎 Cache fingerprint:".cyan().bold());
    println!("   {} {}", "Secret:".yellow(), hash_secret(&request.secret));
    println!("   {} {}", "Algorithm:".yellow(), request.options.algorithm);
    println!("   {} {}", "Cache key:".yellow(), cache_key);
    if !is_cacheable(&request.payload, false) {
        println!(
            "   {} body carries iat/exp, this request is never cached",
            "Note:".dimmed()
        );
    }

    Ok(())
}
