fn main() -> anyhow::Result<()> {
    ampstat::run()
}
