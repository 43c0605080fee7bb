//! # calcline Main Entry Point

use anyhow::Result;
use calcline::cmd_args::CommandLineArgs;
use calcline::logging::init_tracing_subscriber;
use calcline::{AppController, TerminalEventStream, TerminalRenderStream};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    let mut app = AppController::with_io_streams(
        cmd_args,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;

    println!("🧮 calcline");
    println!("Type digits and + - * / then Enter or '=' to calculate");
    println!("Click the keypad with the mouse, Esc or 'c' clears");
    println!("Press 'Ctrl+C' to quit");
    println!("Starting calculator...\n");

    // Small delay to let user read the instructions
    tokio::time::sleep(std::time::Duration::from_millis(1000)).await;

    app.run().await?;

    println!("\n👋 Thanks for using calcline!");
    Ok(())
}
