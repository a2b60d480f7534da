use quantized_bvh::config::USAGE;
use quantized_bvh::{Config, LoadTask};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let config = match Config::parse_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    match LoadTask::spawn(config.model_path.clone(), config.bvh).wait() {
        Ok(model) => {
            let stats = model.tree.stats;
            println!(
                "{}: {} triangles, {} nodes, {} leaves, depth {}, {} bytes of GPU data",
                config.model_path.display(),
                model.object.mesh.len(),
                stats.node_count,
                stats.leaf_count,
                stats.max_depth,
                bytemuck::cast_slice::<_, u8>(&model.tree.nodes).len()
                    + bytemuck::cast_slice::<_, u8>(&model.gpu_triangles).len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}: {e}", config.model_path.display());
            ExitCode::FAILURE
        }
    }
}
