fn main() -> anyhow::Result<()> {
    freshwatch_lib::run()
}
