use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
        use linux_embedded_hal::SpidevDevice;
        use max31855k::*;
        use argh::FromArgs;
        use textplots::{Chart, Plot, Shape};
        use std::thread::sleep;
        use std::time::Duration;
        use indicatif::{ProgressBar, ProgressStyle};
        use std::fs::File;
        use std::io::Write;
        // no_std crates don't have access to the Error trait, but the max31855k error
        // types impl Display, so convert them ad-hoc with eyre!.
        use eyre::{eyre, Result, WrapErr};

        #[derive(FromArgs)]
        #[argh(description = "plot max31855k data")]
        struct InputArgs {
            #[argh(positional)]
            dev: String,
            #[argh(option, short='n', default = "default_num_samples()", description = "number of samples to take")]
            num: u32,
            #[argh(option, short='u', default = "TemperatureUnit::Celsius", from_str_fn(get_unit), description = "unit to plot in (c, f, k or r)")]
            unit: TemperatureUnit,
            #[argh(option, short='o', description = "out json file")]
            out_file: Option<String>
        }

        fn default_num_samples() -> u32 {
            100
        }

        fn get_unit(val: &str) -> Result<TemperatureUnit, String> {
            Ok(TemperatureUnit::from_name(val))
        }

        // A conversion takes up to 100 ms; polling faster returns the same frame.
        const SAMPLE_TIME_MS: u64 = 100;
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    let args: InputArgs = argh::from_env();

    let mut spi = SpidevDevice::open(&args.dev)
        .map_err(|e| eyre!("failed to open {}: {:?}", args.dev, e))?;
    spi.0
        .configure(
            &SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(5_000_000)
                .mode(SpiModeFlags::SPI_MODE_0)
                .build(),
        )
        .wrap_err("failed to configure spidev")?;

    let mut tc = Max31855k::new(spi);
    let mut points: Vec<(f32, f32)> = Vec::new();
    let mut data: Vec<f32> = Vec::new();

    let bar = ProgressBar::new(args.num as u64);
    bar.set_style(ProgressStyle::default_bar().progress_chars("#>-"));

    println!(
        "Capturing data (1 sample every {} milliseconds)",
        SAMPLE_TIME_MS
    );

    for i in 0..args.num {
        match tc.read_temperature(args.unit) {
            Ok(temp) => {
                points.push((i as f32, temp.degrees()));
                data.push(temp.degrees());
            }
            // Faults can clear (thermocouple reseated), so keep sampling.
            Err(Error::Fault(kind)) => bar.println(format!("sample {}: {}", i, kind)),
            Err(e) => return Err(eyre!("failed to read a temperature: {}", e)),
        }

        sleep(Duration::from_millis(SAMPLE_TIME_MS));
        bar.inc(1);
    }

    bar.finish();

    println!(
        "\ny = {} temperature samples in {} (1 every {} milliseconds)",
        data.len(),
        args.unit.symbol(),
        SAMPLE_TIME_MS
    );
    Chart::new(120, 60, 0.0, args.num as f32)
        .lineplot(&Shape::Steps(&points))
        .display();

    let json_str = serde_json::to_string(&data)?;

    if let Some(out) = args.out_file {
        let mut file = File::create(&out).wrap_err_with(|| format!("failed to create {}", out))?;
        file.write_all(json_str.as_bytes())?;
    } else {
        println!("\n{}", json_str);
    }

    let _spi_old = tc.release();

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
