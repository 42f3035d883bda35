fn main() {
    modchart::app::cli::run();
}
