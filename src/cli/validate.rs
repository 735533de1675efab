use clap::Parser;

#[derive(Parser, Debug)]
pub struct ValidateCommand {
    /// Also require the upload resource to exist
    #[arg(long)]
    pub check_resource: bool,
}
