use clap::Parser;
use tracing::info;

use fluvio_future::task::run_block_on;

use edge_template_sc::cli::ControllerOpt;
use edge_template_sc::start_main_loop;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    fluvio_future::subscriber::init_tracer(None);

    let config = ControllerOpt::parse().process();
    println!("starting edge template controller: {VERSION}");

    run_block_on(async move {
        let ctx = start_main_loop(config).await;
        info!(namespace = ctx.config().namespace, "controller started");

        // the dispatch loop owns the process from here on
        std::future::pending::<()>().await;
    });
}
