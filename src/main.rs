fn main() {
    sandbox_setup::app::cli::run();
}
