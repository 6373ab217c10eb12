#[path = "launcher.rs"]
mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("mysafe", server::run_mysafe)
}
