fn main() {
    let cwd = std::env::current_dir().unwrap();
    println!("{}", cwd.display());

    let args: Vec<String> = std::env::args().collect();
    println!("{}", args.join(" "));
}
