fn main() -> anyhow::Result<()> {
    nwn2kit::cli::run_cli()
}
