fn main() {
    helmgen::app::cli::run();
}
