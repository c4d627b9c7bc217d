fn main() {
    fourline_ui::run();
}
