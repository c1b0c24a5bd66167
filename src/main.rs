use clap::Parser;
use sunaba_tween::{EaseType, Tween, TweenSettings};

/// Drive a single tween with a fixed-step frame loop and print each frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start value
    #[arg(long, default_value_t = 0.0)]
    from: f32,

    /// End value
    #[arg(long, default_value_t = 1.0)]
    to: f32,

    /// Duration in seconds (overrides tween.ron)
    #[arg(long)]
    duration: Option<f32>,

    /// Easing preset, e.g. quad-out (overrides tween.ron)
    #[arg(long, value_parser = parse_ease)]
    ease: Option<EaseType>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Play the tween forward and then back again
    #[arg(long)]
    ping_pong: bool,
}

fn parse_ease(name: &str) -> Result<EaseType, String> {
    let normalized = name.replace('-', "_").to_ascii_lowercase();
    EaseType::from_name(&normalized)
        .ok_or_else(|| format!("unknown easing preset: {name}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut settings = TweenSettings::load()?;
    if let Some(duration) = args.duration {
        settings.duration = duration;
    }
    if let Some(ease) = args.ease {
        settings.ease = ease;
    }
    anyhow::ensure!(args.fps > 0, "--fps must be positive");

    let mut tween = Tween::from_settings(args.from, args.to, &settings)?;
    log::info!("Starting {}", tween);

    let dt = 1.0 / args.fps as f32;
    let mut frame = 0u32;
    let mut passes = if args.ping_pong { 2 } else { 1 };

    println!("{:>6} {:>8} {:>12}", "frame", "time", "value");
    println!("{:>6} {:>8.3} {:>12.5}", frame, 0.0, tween.value());

    while passes > 0 {
        frame += 1;
        let running = tween.update(dt);
        println!(
            "{:>6} {:>8.3} {:>12.5}",
            frame,
            frame as f32 * dt,
            tween.value()
        );

        if !running {
            passes -= 1;
            if passes > 0 {
                tween.reverse();
                tween.start();
                log::info!("Reversing {}", tween);
            }
        }
    }

    log::info!("Finished {}", tween);
    Ok(())
}
