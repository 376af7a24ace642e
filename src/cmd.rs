use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "conda-tools", about = "conda env tools")]
pub struct Command {
    #[structopt(
        long = "conda",
        help = "conda binary - defaults to $CONDA_EXE",
        parse(from_os_str)
    )]
    pub conda_exe: Option<PathBuf>,

    #[structopt(subcommand)]
    pub sub_cmd: SubCommand,
}

#[derive(StructOpt, Debug)]
pub enum SubCommand {
    #[structopt(name = "copy_vars", about = "Copy env vars file to another conda env")]
    CopyVars {
        #[structopt(
            short = "s",
            long = "src_env",
            help = "Source conda env - defaults to current env"
        )]
        src_env: Option<String>,

        #[structopt(short = "d", long = "dest_env", help = "Destination conda env")]
        dest_env: String,

        #[structopt(
            short = "l",
            long = "local_dir",
            help = "Local env var file dir to export - replaces src_env",
            parse(from_os_str)
        )]
        local_dir: Option<PathBuf>,
    },

    #[structopt(name = "export_vars", about = "Export env vars file to local dir")]
    ExportVars {
        #[structopt(
            short = "s",
            long = "src_env",
            help = "Source conda env - defaults to current env"
        )]
        src_env: Option<String>,

        #[structopt(
            short = "o",
            long = "output_dir",
            help = "Directory to copy files into - defaults to cwd",
            parse(from_os_str)
        )]
        output_dir: Option<PathBuf>,
    },

    #[structopt(
        name = "unset_vars",
        about = "Print a deactivate script matching the env activate script"
    )]
    UnsetVars {
        #[structopt(
            short = "s",
            long = "src_env",
            help = "Source conda env - defaults to current env"
        )]
        src_env: Option<String>,
    },

    #[structopt(name = "ver", about = "(De)Version dependencies in conda env yml file")]
    Ver {
        #[structopt(short = "x", help = "Strip package versions")]
        strip: bool,

        #[structopt(
            help = "Conda env file or output from `conda env export` - defaults to stdin",
            parse(from_os_str)
        )]
        infile: Option<PathBuf>,
    },
}
