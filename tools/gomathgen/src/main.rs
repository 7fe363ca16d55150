fn main() -> anyhow::Result<()> {
    gomathgen::run()
}
