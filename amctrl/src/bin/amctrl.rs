use amctrl::{
    error::CtrlError,
    handle::WorkspaceCtrl,
    registry::Builder,
    reply::{
        Confirmation,
        ErrorReply,
    },
};
use amcore::stage::StageListing;
use clap::{
    ArgAction,
    Parser,
    Subcommand,
};
use percent_encoding::{
    utf8_percent_encode,
    NON_ALPHANUMERIC,
};
use std::{
    io,
    process,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    registry: Builder,
    /// Percent-encoded workspace identifier, e.g. a `file://` URI.
    #[clap(long, value_name = "AM_WORKSPACE", env = "AM_WORKSPACE")]
    workspace: String,
    #[clap(short = 'j', long = "json", action)]
    json: bool,
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    Branch {
        #[command(subcommand)]
        cmd: BranchCmd,
    },
    /// Stage the references, unstage those given with `--remove`, then
    /// print the resulting stage.  `--empty` clears the stage and the
    /// repository index first.  References are taken literally, e.g.
    /// `assets/100%.png`.
    Stage {
        refs: Vec<String>,
        #[clap(long, short = 'r')]
        remove: Vec<String>,
        #[clap(long, action)]
        empty: bool,
    },
}

#[derive(Debug, Subcommand)]
enum BranchCmd {
    List,
    Current,
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Change {
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Delete {
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module("amctrl")
        .module("amrepo")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let registry = args.registry.build();
    let result = registry.find(&args.workspace)
        .and_then(|workspace| match args.command {
            Commands::Branch { cmd } => parse_branch(&workspace, cmd, args.json),
            Commands::Stage { refs, remove, empty } => {
                if empty {
                    workspace.empty_stage()?;
                }
                parse_stage(&workspace, refs, remove, args.json)
            }
        });
    if let Err(e) = result {
        let reply = ErrorReply::from(&e);
        if args.json {
            serde_json::to_writer(io::stderr(), &reply)?;
            eprintln!();
        }
        else {
            eprintln!("{} {}: {}", reply.code, reply.kind, reply.message);
        }
        process::exit(1);
    }
    Ok(())
}

fn confirm(confirmation: Confirmation, json: bool) -> Result<(), CtrlError> {
    if json {
        println!("{}", serde_json::json!(confirmation));
    }
    else {
        println!("{confirmation}");
    }
    Ok(())
}

fn parse_branch(
    workspace: &WorkspaceCtrl,
    arg: BranchCmd,
    json: bool,
) -> Result<(), CtrlError> {
    match arg {
        BranchCmd::List => {
            let listing = workspace.list_branches()?;
            if json {
                println!("{}", serde_json::json!(listing));
            }
            else {
                let current = workspace.get_current_branch();
                for name in listing.local.iter() {
                    let marker = if *name == current { "*" } else { " " };
                    println!("{marker} {name}");
                }
                for name in listing.remote.iter() {
                    println!("  {name} (remote)");
                }
            }
            Ok(())
        }
        BranchCmd::Current => {
            let current = workspace.get_current_branch();
            if json {
                println!("{}", serde_json::json!(current));
            }
            else {
                println!("{current}");
            }
            Ok(())
        }
        BranchCmd::Create { name } => confirm(workspace.create_branch(&name)?, json),
        BranchCmd::Change { name } => confirm(workspace.change_branch(&name)?, json),
        BranchCmd::Delete { name } => confirm(workspace.delete_branch(&name)?, json),
    }
}

fn parse_stage(
    workspace: &WorkspaceCtrl,
    refs: Vec<String>,
    remove: Vec<String>,
    json: bool,
) -> Result<(), CtrlError> {
    for reference in refs.iter() {
        workspace.add_asset_to_stage(&encode_ref(reference))?;
    }
    for reference in remove.iter() {
        workspace.remove_asset_from_stage(&encode_ref(reference))?;
    }
    let listing = StageListing::from(workspace.get_stage());
    if json {
        println!("{}", serde_json::json!(listing));
    }
    else {
        println!("{} staged", listing.items.len());
        for item in listing.items.iter() {
            println!("{item}");
        }
    }
    Ok(())
}

/// The staging operations decode one layer of percent-encoding.
fn encode_ref(reference: &str) -> String {
    utf8_percent_encode(reference, NON_ALPHANUMERIC).to_string()
}
