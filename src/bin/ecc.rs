use std::io::{self, Write};

use clap::{Parser, Subcommand};
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use num_bigint::BigUint;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use sha2::{Digest, Sha256};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use weierstrass_ecc::config::Config;
use weierstrass_ecc::{
    diffie_hellman, digest, elgamal, scan_for_nonce_reuse, Curve, Key, Parameters, Point,
    SecureRng, Signature, SigningKey,
};

#[derive(Parser, Debug)]
#[command(name = "ecc")]
#[command(about = "Elliptic-curve arithmetic and protocol playground", long_about = None)]
#[command(version)]
struct Args {
    /// Coefficient a (overrides configuration)
    #[arg(long, global = true, allow_negative_numbers = true)]
    a: Option<i64>,

    /// Coefficient b (overrides configuration)
    #[arg(long, global = true, allow_negative_numbers = true)]
    b: Option<i64>,

    /// Prime modulus p (overrides configuration)
    #[arg(long, global = true)]
    p: Option<u64>,

    /// Base point x-coordinate
    #[arg(long, global = true)]
    base_x: Option<u64>,

    /// Base point y-coordinate
    #[arg(long, global = true)]
    base_y: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long, global = true, env = "ECC_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the curve, its cardinality and the base point order
    Info,

    /// Search the curve for a point of prime order
    Generator,

    /// Run a Diffie-Hellman exchange on the base point
    Dh {
        /// Alice's secret (random if omitted)
        #[arg(long)]
        alice: Option<u64>,

        /// Bob's secret (random if omitted)
        #[arg(long)]
        bob: Option<u64>,
    },

    /// Encrypt and decrypt a point with ElGamal
    Elgamal {
        /// Recipient's private key (random if omitted)
        #[arg(short, long)]
        secret: Option<u64>,

        /// Message point x-coordinate (random curve point if omitted)
        #[arg(long, requires = "message_y")]
        message_x: Option<u64>,

        /// Message point y-coordinate
        #[arg(long, requires = "message_x")]
        message_y: Option<u64>,
    },

    /// Sign a message with ECDSA and verify the result
    Sign {
        /// Message to sign
        message: String,

        /// Private key (random if omitted)
        #[arg(short, long)]
        secret: Option<u64>,
    },

    /// Sign several messages with one nonce and recover the private key
    Recover {
        /// Messages to sign
        #[arg(required = true, num_args = 2..)]
        messages: Vec<String>,

        /// Private key to leak
        #[arg(short, long, default_value = "77")]
        secret: u64,

        /// Nonce reused across every signature
        #[arg(short, long, default_value = "5")]
        nonce: u64,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn print_colored(color: Color, text: &str) {
    let mut stdout = io::stdout();
    execute!(stdout, SetForegroundColor(color), Print(text), ResetColor).ok();
    stdout.flush().ok();
}

fn println_colored(color: Color, text: &str) {
    print_colored(color, text);
    println!();
}

fn display_banner() {
    println!();
    println_colored(
        Color::Cyan,
        "+---------------------------------------------------------+",
    );
    println_colored(
        Color::Cyan,
        "|           Weierstrass Elliptic-Curve Toolkit            |",
    );
    println_colored(
        Color::Cyan,
        "+---------------------------------------------------------+",
    );
    println!();
}

fn display_field(label: &str, value: impl std::fmt::Display) {
    print_colored(Color::Yellow, &format!("  {label:<14}"));
    println!("{value}");
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(a) = args.a {
        config.curve.a = a;
    }
    if let Some(b) = args.b {
        config.curve.b = b;
    }
    if let Some(p) = args.p {
        config.curve.p = p;
    }
    if let Some(x) = args.base_x {
        config.curve.base_x = x;
    }
    if let Some(y) = args.base_y {
        config.curve.base_y = y;
    }
}

fn build_rng(seed: Option<u64>) -> CliResult<ChaCha20Rng> {
    match seed {
        Some(seed) => {
            info!(seed, "using seeded generator");
            Ok(ChaCha20Rng::seed_from_u64(seed))
        }
        None => Ok(ChaCha20Rng::from_rng(SecureRng::new())?),
    }
}

fn signature_parameters(base: &Point) -> CliResult<Parameters> {
    let order = base.order();
    Ok(Parameters::new(base.clone(), order)?)
}

fn run_info(curve: &Curve, base: &Point) {
    display_field("curve", curve);
    display_field("cardinality", curve.cardinality());
    display_field("base point", base);
    display_field("base order", base.order());
}

fn run_generator(curve: &Curve, config: &Config, rng: &mut ChaCha20Rng) -> CliResult<()> {
    let params = Parameters::discover(curve, rng, config.limits.generator_attempts)?;
    display_field("generator", params.generator());
    display_field("order", params.order());
    Ok(())
}

fn run_dh(
    curve: &Curve,
    base: &Point,
    alice: Option<u64>,
    bob: Option<u64>,
    rng: &mut ChaCha20Rng,
) -> CliResult<()> {
    let alice = match alice {
        Some(secret) => Key::new(curve, base.clone(), BigUint::from(secret))?,
        None => Key::random(curve, base.clone(), rng)?,
    };
    let bob = match bob {
        Some(secret) => Key::new(curve, base.clone(), BigUint::from(secret))?,
        None => Key::random(curve, base.clone(), rng)?,
    };

    display_field("alice share", alice.public_point());
    display_field("bob share", bob.public_point());

    let shared = diffie_hellman(alice.private_key(), bob.private_key(), base)?;
    display_field("shared point", &shared);
    Ok(())
}

fn run_elgamal(
    curve: &Curve,
    base: &Point,
    secret: Option<u64>,
    message: Option<(u64, u64)>,
    rng: &mut ChaCha20Rng,
) -> CliResult<()> {
    let key = match secret {
        Some(secret) => Key::new(curve, base.clone(), BigUint::from(secret))?,
        None => Key::random(curve, base.clone(), rng)?,
    };

    let message = match message {
        Some((x, y)) => curve.point(x, y)?,
        None => {
            let k = weierstrass_ecc::primitives::rng::random_scalar(
                rng,
                &BigUint::from(1u32),
                &(curve.p() - 1u32),
            );
            base.scalar_mul(&k)
        }
    };

    let ciphertext = elgamal::encrypt(curve, key.base(), key.public_point(), &message, rng)?;
    let recovered = elgamal::decrypt(key.private_key(), &ciphertext)?;

    display_field("public key", key.public_point());
    display_field("message", &message);
    display_field("c1", ciphertext.c1());
    display_field("c2", ciphertext.c2());
    display_field("decrypted", &recovered);

    if recovered != message {
        return Err("decryption did not recover the message".into());
    }
    Ok(())
}

fn run_sign(
    base: &Point,
    config: &Config,
    message: &str,
    secret: Option<u64>,
    rng: &mut ChaCha20Rng,
) -> CliResult<()> {
    let params = signature_parameters(base)?;
    let key = match secret {
        Some(secret) => SigningKey::new(params, BigUint::from(secret))?,
        None => SigningKey::random(params, rng),
    }
    .with_max_attempts(config.limits.signing_attempts);

    let signature = key.sign_message(rng, message.as_bytes())?;
    let valid = key
        .verifying_key()
        .verify_message(message.as_bytes(), &signature);

    display_field("sha256", hex::encode(Sha256::digest(message.as_bytes())));
    display_field("public key", key.verifying_key().public_point());
    display_field("signature", format!("({}, {})", signature.x(), signature.y()));

    if valid {
        println_colored(Color::Green, "  signature verified");
        Ok(())
    } else {
        println_colored(Color::Red, "  signature rejected");
        Err("freshly produced signature failed verification".into())
    }
}

fn run_recover(base: &Point, messages: &[String], secret: u64, nonce: u64) -> CliResult<()> {
    let params = signature_parameters(base)?;
    let order = params.order().clone();
    let key = SigningKey::new(params, BigUint::from(secret))?;
    let nonce = BigUint::from(nonce);

    let mut signed: Vec<(BigUint, Signature)> = Vec::with_capacity(messages.len());
    for message in messages {
        let m = digest(message.as_bytes());
        let Some(signature) = key.try_sign_with_nonce(&nonce, &m) else {
            return Err(format!("nonce {nonce} is degenerate for {message:?}").into());
        };
        display_field(
            message,
            format!("({}, {})", signature.x(), signature.y()),
        );
        signed.push((m, signature));
    }

    let recovered = scan_for_nonce_reuse(&order, &signed)?;
    if recovered.is_empty() {
        println_colored(Color::Red, "  no key recovered");
        return Ok(());
    }

    for key in recovered {
        println_colored(Color::Green, "  recovered from reused nonce");
        display_field("nonce", &key.nonce);
        display_field("secret", &key.secret);
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    display_banner();

    let mut config = Config::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        Config::default()
    });
    apply_overrides(&mut config, &args);

    if let Err(e) = config.validate() {
        println_colored(Color::Red, &format!("Configuration validation failed: {e}"));
        return Err(format!("Invalid configuration: {e}").into());
    }

    let curve = config.build_curve()?;
    let base = config.build_base_point(&curve)?;
    let mut rng = build_rng(args.seed)?;

    let outcome = match args.command {
        Commands::Info => {
            run_info(&curve, &base);
            Ok(())
        }
        Commands::Generator => run_generator(&curve, &config, &mut rng),
        Commands::Dh { alice, bob } => run_dh(&curve, &base, alice, bob, &mut rng),
        Commands::Elgamal {
            secret,
            message_x,
            message_y,
        } => run_elgamal(&curve, &base, secret, message_x.zip(message_y), &mut rng),
        Commands::Sign { message, secret } => run_sign(&base, &config, &message, secret, &mut rng),
        Commands::Recover {
            messages,
            secret,
            nonce,
        } => run_recover(&base, &messages, secret, nonce),
    };

    if let Err(e) = &outcome {
        println_colored(Color::Red, &format!("Error: {e}"));
    }
    println!();
    outcome
}
