use conda_tools::Command;
use structopt::StructOpt;

fn main() {
    let cmd = Command::from_args();
    let settings = conda_tools::Settings::from_env();
    let result = conda_tools::run(cmd, settings);
    if let Err(error) = result {
        conda_tools::print_error(&error.to_string());
        std::process::exit(1)
    };
}
