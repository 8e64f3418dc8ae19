use job_runners::importer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("outage_importer")?;
    let result = importer::run().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result.map(|_| ())
}
