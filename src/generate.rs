//! Generate command handler.

use anyhow::Context;
use roster_core::Synthesizer;
use roster_generator::{Emitter, FileSink, GenerateArgs};

/// Run the generate command.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }

    let mut sink = FileSink::create(&args.output, args.queue_depth)
        .with_context(|| format!("Failed to open output file: {:?}", args.output))?;
    let mut emitter = Emitter::new(Synthesizer::new(args.seed));

    let metrics = emitter.run(args.total_records, &mut sink).await?;

    tracing::info!(
        "Generated {} records ({} bytes) at {:?} in {:?} ({:.2} records/sec)",
        metrics.records_written,
        sink.bytes_written(),
        args.output,
        metrics.total_duration,
        metrics.records_per_second()
    );
    Ok(())
}
