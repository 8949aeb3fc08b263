use ember::canvas::DrawList;
use ember::effect_params::{get_effect_config_from_default_file, EffectParams};
use ember::frame_clock::FramePacer;
use ember::random::Prng;
use log::{error, info};

gflags::define! {
    --config: &str = "effect_config.toml"
}

gflags::define! {
    --frames: u32 = 300
}

gflags::define! {
    --fps: f64 = 60.0
}

gflags::define! {
    /// Seed for emission; 0 seeds from entropy.
    --seed: u64 = 0
}

gflags::define! {
    --log_filter: &str = "info"
}

gflags::define! {
    -h, --help = false
}

fn read_config_from_file(path: &str) -> anyhow::Result<EffectParams> {
    let params = std::fs::read_to_string(path)?.parse()?;
    Ok(params)
}

fn main() -> anyhow::Result<()> {
    gflags::parse();
    if HELP.flag {
        gflags::print_help_and_exit(0);
    }
    scrub_log::init_with_filter_string(LOG_FILTER.flag)
        .map_err(|e| anyhow::anyhow!("Failed to init logging: {:?}", e))?;

    let params = match read_config_from_file(CONFIG.flag) {
        Ok(params) => params,
        Err(e) => {
            error!("Failed to read config file({}): {:?}", CONFIG.flag, e);
            get_effect_config_from_default_file()
        }
    };
    let rng = if SEED.flag == 0 {
        Prng::from_entropy()
    } else {
        Prng::seeded(SEED.flag)
    };
    let mut system = params.instantiate([320.0, 240.0], rng)?;

    let mut pacer = FramePacer::new(FPS.flag)?;
    let mut canvas = DrawList::new();
    for frame in 0..FRAMES.flag {
        system.update();
        canvas.clear();
        system.render(&mut canvas);
        if frame % 30 == 0 {
            info!(
                "Frame {}: {} particles, {} draw calls",
                frame,
                system.particle_count(),
                canvas.len()
            );
        }
        if system.is_finished() {
            info!("Effect {} finished after {} frames", params.name, frame);
            break;
        }
        pacer.wait();
    }
    Ok(())
}
