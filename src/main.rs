//! InductorLab entry point
//!
//! Native: a headless run that drags the magnet back and forth through the
//! coil and logs telemetry. The browser build is driven from JavaScript
//! through `platform::web::WebLab`.

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;

    use inductor_lab::consts::{EMF_CHART_RANGE, FLUX_CHART_RANGE, SIM_DT};
    use inductor_lab::platform::FrameLoop;
    use inductor_lab::sim::{Intent, Simulation, SourceType};
    use inductor_lab::tutor::basic_explanation;
    use inductor_lab::Settings;

    #[derive(Parser, Debug)]
    #[command(about = "Headless Faraday's Law induction lab")]
    struct Args {
        /// Settings JSON file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to run
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
        /// Pace frames at the simulation rate instead of running flat out
        #[arg(long)]
        realtime: bool,
        /// Override the source: "dc" or "ac"
        #[arg(short, long)]
        source: Option<String>,
        /// Pause at this frame and print the tutor summary
        #[arg(long)]
        pause_at: Option<u64>,
        /// Seconds for one full drag sweep through the coil
        #[arg(long, default_value_t = 4.0)]
        sweep_period: f64,
        /// Log telemetry every N frames
        #[arg(long, default_value_t = 30)]
        log_every: u64,
        /// Print the history buffer as JSON when done
        #[arg(long)]
        dump_history: bool,
    }

    /// Scripted drag: sweep x between -amplitude and +amplitude through the coil
    fn drag_position(frame: u64, period: f64, amplitude: f64) -> f64 {
        let t = frame as f64 * SIM_DT;
        -amplitude * (std::f64::consts::TAU * t / period).cos()
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let settings = match &args.config {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };
        let mut sim = Simulation::new(settings.initial_state());

        if let Some(name) = &args.source {
            let source = SourceType::from_str(name)
                .ok_or_else(|| anyhow::anyhow!("unknown source type: {name}"))?;
            sim.submit(Intent::SetSourceType(source));
        }

        log::info!(
            "InductorLab (native) starting: {} frames, {} source",
            args.frames,
            args.source.as_deref().unwrap_or(settings.source.as_str())
        );

        let amplitude = settings.magnet_x.abs().max(1.0);
        let mut frame_loop = FrameLoop::new(args.realtime);
        let cancel = frame_loop.cancel_handle();
        let mut frame = 0u64;
        let mut peak_emf = 0.0f64;
        let mut peak_flux = 0.0f64;

        frame_loop.run(|now| {
            if Some(frame) == args.pause_at {
                sim.submit(Intent::SetPaused(true));
            }
            if sim.state().source_type == SourceType::DcMagnet {
                let x = drag_position(frame, args.sweep_period, amplitude);
                sim.submit(Intent::SetPosition { x, y: settings.magnet_y });
            }
            sim.tick(now);

            let data = *sim.data();
            peak_emf = peak_emf.max(data.emf.abs());
            peak_flux = peak_flux.max(data.flux.abs());

            if args.log_every > 0 && frame % args.log_every == 0 {
                log::info!(
                    "t={:6.3}s x={:7.2} flux={:8.4}Wb emf={:8.4}V flow={}",
                    sim.state().current_time,
                    sim.state().magnet.x,
                    data.flux,
                    data.emf,
                    data.current_direction.label()
                );
            }

            frame += 1;
            if frame >= args.frames || sim.tutor_snapshot().is_some() {
                cancel.cancel();
            }
        });

        if let Some(snapshot) = sim.tutor_snapshot() {
            println!("{}", snapshot.summary());
            println!();
        }
        println!("{}", basic_explanation(sim.data()));

        if peak_emf > EMF_CHART_RANGE.1 || peak_flux > FLUX_CHART_RANGE.1 {
            log::warn!(
                "Peaks exceed chart ranges (emf {:.2}, flux {:.2})",
                peak_emf,
                peak_flux
            );
        }

        if args.dump_history {
            println!("{}", serde_json::to_string_pretty(sim.history())?);
        }

        log::info!("Ran {} ticks", sim.ticks());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native_demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
