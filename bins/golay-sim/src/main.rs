use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use golay_core::debug;
use golay_fec::{
    BscChannel, CODEWORD_BITS, MAX_MESSAGE, MESSAGE_BITS, blocks, decode, encode, gf2,
};

mod sim_config;
use sim_config::SimConfig;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SimConfig {
    match sim_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Golay (23,12,7) noisy-link simulator",
    long_about = "Pushes messages through the Golay (23,12,7) encode -> BSC -> decode pipeline \
                  and reports correction statistics. Parameters come from an optional TOML \
                  config, overridable per flag."
)]
struct Args {
    /// TOML config with simulation parameters
    config: Option<String>,

    /// Bit error rate of the channel
    #[arg(long)]
    ber: Option<f64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of Monte-Carlo transmissions
    #[arg(long)]
    trials: Option<usize>,

    /// UTF-8 payload pushed through the block codec
    #[arg(long)]
    payload: Option<String>,
}

/// Fixed walkthrough of the coding pipeline: clean transmission, a single
/// flipped bit, three flipped bits.
fn run_walkthrough() {
    let message: u16 = 0b1010_1010_1010;
    let codeword = encode(message).unwrap();

    tracing::info!("walkthrough message   {}", gf2::bitstr(message as u32, MESSAGE_BITS));
    tracing::info!(
        "walkthrough codeword  {} (parity {} | message {})",
        gf2::bitstr(codeword, CODEWORD_BITS),
        gf2::bitstr(codeword >> 12, CODEWORD_BITS - MESSAGE_BITS),
        gf2::bitstr(codeword & 0xFFF, MESSAGE_BITS)
    );

    let clean = decode(codeword).unwrap();
    tracing::info!(
        "clean: recovered {} success {}",
        clean.message,
        clean.success
    );

    let single = decode(codeword ^ 1 << 7).unwrap();
    tracing::info!(
        "bit 7 flipped: recovered {} corrected positions {:?}",
        single.message,
        single.error_positions
    );

    let triple = decode(codeword ^ (1 << 3 | 1 << 9 | 1 << 15)).unwrap();
    tracing::info!(
        "bits 3,9,15 flipped: recovered {} corrected positions {:?} pattern {}",
        triple.message,
        triple.error_positions,
        triple.error_pattern_bits()
    );

    assert_eq!(clean.message, message);
    assert_eq!(single.message, message);
    assert_eq!(triple.message, message);
}

/// Random messages through the noisy channel, tallying recovery results.
fn run_monte_carlo(chan: &mut BscChannel, msg_rng: &mut StdRng, ber: f64, trials: usize) {
    let mut recovered = 0usize;
    let mut miscorrected = 0usize;
    let mut failed = 0usize;
    let mut bits_corrected = 0usize;

    for trial in 0..trials {
        let message: u16 = msg_rng.random_range(0..=MAX_MESSAGE);
        let codeword = encode(message).unwrap();
        let report = chan.transmit(codeword, ber).unwrap();
        let outcome = decode(report.corrupted).unwrap();

        if outcome.success && outcome.message == message {
            recovered += 1;
            bits_corrected += outcome.error_positions.len();
        } else if outcome.success {
            miscorrected += 1;
        } else {
            failed += 1;
        }

        tracing::debug!(
            "trial {}: msg {} +{} errors -> {} [{}]",
            trial,
            message,
            report.count,
            outcome.message,
            if outcome.message == message { "ok" } else { "LOST" }
        );
    }

    tracing::info!(
        "monte-carlo: {}/{} recovered at ber {} ({} bit errors corrected, {} miscorrected, {} failed)",
        recovered,
        trials,
        ber,
        bits_corrected,
        miscorrected,
        failed
    );
}

/// A UTF-8 payload through the block codec and the noisy channel.
fn run_payload(chan: &mut BscChannel, payload: &str, ber: f64) {
    let bits = blocks::bits_of_bytes(payload.as_bytes());
    let encoded = blocks::encode_blocks(&bits);

    let received: Vec<u32> = encoded
        .codewords
        .iter()
        .map(|&c| chan.transmit(c, ber).unwrap().corrupted)
        .collect();

    let decoded = blocks::decode_blocks(&received, encoded.pad_bits).unwrap();
    let recovered = blocks::bytes_of_bits(&decoded.bits);

    tracing::info!(
        "payload: {} bytes in {} blocks ({} pad bits), {} bit errors corrected, {} uncorrectable blocks",
        payload.len(),
        encoded.codewords.len(),
        encoded.pad_bits,
        decoded.corrected_errors,
        decoded.uncorrectable_blocks
    );
    tracing::info!("recovered payload: {:?}", String::from_utf8_lossy(&recovered));
}

fn main() {
    eprintln!("golay-sim: transmission over a noisy link, protected by the (23,12,7) Golay code\n");

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => load_config_from_toml(path),
        None => SimConfig::default(),
    };

    // Flags override the config file
    if let Some(ber) = args.ber {
        cfg.bit_error_rate = ber;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(trials) = args.trials {
        cfg.trials = trials;
    }
    if let Some(payload) = args.payload {
        cfg.payload = Some(payload);
    }

    let _log_guard = debug::setup_logging_default(cfg.debug_log.clone());
    tracing::info!("simulation config: {:?}", cfg);

    // One channel stream for the whole session; the message source gets its
    // own stream so seeded runs reproduce end to end
    let (mut chan, mut msg_rng) = match cfg.seed {
        Some(seed) => (
            BscChannel::seeded(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (BscChannel::new(), StdRng::from_os_rng()),
    };

    run_walkthrough();
    run_monte_carlo(&mut chan, &mut msg_rng, cfg.bit_error_rate, cfg.trials);

    if let Some(payload) = cfg.payload.clone() {
        run_payload(&mut chan, &payload, cfg.bit_error_rate);
    }
}
