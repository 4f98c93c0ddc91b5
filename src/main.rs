fn main() -> anyhow::Result<()> {
    console_to_logger::run_cli()
}
