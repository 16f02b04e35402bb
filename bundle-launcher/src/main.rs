//! Launcher executing the compiled-in entrypoint from the `lib` directory next to it.

fn main() {
    bundle_launcher::main()
}
