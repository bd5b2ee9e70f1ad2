use std::path::PathBuf;
use std::process::ExitCode;

use babygit::commands::identity::IdentityUpdate;
use babygit::commands::push::PushOptions;
use babygit::commands::{identity, install, open_repos, push, scan, status};
use babygit::{config, error, logging, output};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
	name = "babygit",
	about = "BabyGit - Put a folder on GitHub without learning git first",
	long_about = "babygit walks you through setting your git name and email, choosing \
                  which files of a folder to upload, and committing and pushing them \
                  to a GitHub repository. Every step is safe to repeat.",
	version
)]
struct Cli {
	/// Where your username, email and repository URL are remembered.
	#[arg(long, global = true)]
	data_file: Option<PathBuf>,
	/// Show more log output (repeat for more detail).
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Commit the chosen files of a folder and push them to GitHub.
	///
	/// Without --file or --all an interactive checklist lets you pick files.
	Push {
		/// Project folder (defaults to the current directory).
		#[arg(long)]
		path: Option<PathBuf>,
		/// Commit message. Left blank it becomes "Update project".
		#[arg(long, short = 'm')]
		message: Option<String>,
		/// File to commit, relative to the folder. Repeat for more files.
		#[arg(long = "file", short = 'f')]
		files: Vec<String>,
		/// Commit every file in the folder without asking.
		#[arg(long)]
		all: bool,
		/// Automatically confirm interactive prompts.
		#[arg(long, short = 'y')]
		yes: bool,
		/// Color theme for the file checklist (slate or light).
		#[arg(long)]
		theme: Option<String>,
	},
	/// Show or change the stored GitHub username, email and repository URL.
	Identity {
		#[arg(long)]
		username: Option<String>,
		#[arg(long)]
		email: Option<String>,
		#[arg(long)]
		repo_url: Option<String>,
	},
	/// List the files of a folder and check it is small enough to upload.
	Scan {
		/// Folder to scan (defaults to the current directory).
		#[arg(long)]
		path: Option<PathBuf>,
	},
	/// Show the branch, remote and identity of a folder's repository.
	Status {
		/// Repository folder (defaults to the current directory).
		#[arg(long)]
		path: Option<PathBuf>,
	},
	/// Install git (automatic on Windows, otherwise opens the download page).
	InstallGit {
		/// Automatically confirm interactive prompts.
		#[arg(long, short = 'y')]
		yes: bool,
	},
	/// Open your GitHub repositories page to create a new repository.
	OpenRepos {
		/// GitHub username (defaults to the stored one).
		#[arg(long)]
		username: Option<String>,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init(cli.verbose);
	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			output::error(&error::describe(&err));
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let data_path = config::data_file_path(cli.data_file.as_deref());

	match cli.command {
		Command::Push {
			path,
			message,
			files,
			all,
			yes,
			theme,
		} => push::run(
			&data_path,
			PushOptions {
				path,
				message,
				files,
				all,
				yes,
				theme,
			},
		),
		Command::Identity {
			username,
			email,
			repo_url,
		} => identity::run(
			&data_path,
			IdentityUpdate {
				username,
				email,
				repo_url,
			},
		),
		Command::Scan { path } => scan::run(path.as_deref()),
		Command::Status { path } => status::run(path.as_deref()),
		Command::InstallGit { yes } => install::run(yes),
		Command::OpenRepos { username } => open_repos::run(&data_path, username.as_deref()),
	}
}
