fn main() -> anyhow::Result<()> {
    nuscene::cli::run_cli()
}
