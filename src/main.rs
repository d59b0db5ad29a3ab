use std::thread;
use std::time::{Duration, SystemTime};

use argh::FromArgs;
use eyre::{eyre, Result, WrapErr};
use max31855k::*;
use tracing::{info, warn};

#[derive(FromArgs)]
#[argh(description = "poll a MAX31855K thermocouple converter over spidev")]
struct InputArgs {
    #[argh(positional, description = "spidev device, e.g. /dev/spidev0.0")]
    dev: String,
    #[argh(option, short = 'u', default = "TemperatureUnit::Celsius", from_str_fn(get_unit), description = "unit to report in (c, f, k or r)")]
    unit: TemperatureUnit,
    #[argh(option, short = 'i', default = "1000", description = "milliseconds between samples")]
    interval: u64,
    #[argh(option, short = 'n', description = "stop after this many samples")]
    num: Option<u32>,
    #[argh(option, short = 's', default = "5_000_000", description = "SPI clock in Hz (max 5 MHz)")]
    speed: u32,
    #[argh(option, default = "CS_SETTLE_NS", description = "nanoseconds to wait after chip-select")]
    settle_ns: u32,
}

fn get_unit(val: &str) -> Result<TemperatureUnit, String> {
    Ok(TemperatureUnit::from_name(val))
}

// A faulted frame still carries a valid cold-junction temperature.
fn report(now: u64, reading: &DecodedReading, unit: TemperatureUnit) -> Result<String, (FaultKind, Temperature)> {
    let cold_junction = reading.cold_junction();
    let temp = reading.temperature(unit).map_err(|kind| (kind, cold_junction))?;
    Ok(format!("{}: {} (cold junction {})", now, temp, cold_junction))
}

fn poll<SPI>(mut tc: Max31855k<SPI>, args: &InputArgs) -> Result<()>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    let mut taken = 0;

    while args.num.map_or(true, |n| taken < n) {
        let reading = tc
            .read_reading()
            .map_err(|e| eyre!("failed to read {}: {}", args.dev, e))?;
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .wrap_err("system clock is before 1970")?
            .as_secs();

        match report(now, &reading, args.unit) {
            Ok(line) => println!("{}", line),
            // Faults can clear on their own; report and keep polling.
            Err((kind, cold_junction)) => warn!(now, %kind, %cold_junction, "thermocouple fault"),
        }

        taken += 1;
        thread::sleep(Duration::from_millis(args.interval));
    }

    Ok(())
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn open(args: &InputArgs) -> Result<linux_embedded_hal::SpidevDevice> {
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::SpidevDevice;

    let mut spi = SpidevDevice::open(&args.dev)
        .map_err(|e| eyre!("failed to open {}: {:?}", args.dev, e))?;
    spi.0
        .configure(
            &SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(args.speed)
                .mode(SpiModeFlags::SPI_MODE_0)
                .build(),
        )
        .wrap_err_with(|| format!("failed to configure {}", args.dev))?;

    Ok(spi)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: InputArgs = argh::from_env();
    let spi = open(&args)?;
    info!(dev = %args.dev, unit = ?args.unit, speed = args.speed, "polling MAX31855K");

    poll(Max31855k::with_settle_time(spi, args.settle_ns), &args)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() -> Result<()> {
    let _args: InputArgs = argh::from_env();
    Err(eyre!("spidev is only available on Linux"))
}
