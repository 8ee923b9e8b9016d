fn main() {
    mixtura::run_cli();
}
