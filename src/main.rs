fn main() -> anyhow::Result<()> {
    textured_quad::run()
}
