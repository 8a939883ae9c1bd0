//! Post commands

use canvas_core::errors::ExError;
use canvas_core::model::{Attributes, NewPost, Position, PostUpdate};
use canvas_engine::commands::board_command::{
    apply_board_command, BoardCommand, BoardCommandResult,
};
use canvas_engine::commands::board_query::{apply_board_query, BoardQuery, BoardQueryResult};
use clap::{Args, Subcommand};

use super::{print_json, request_context};
use crate::config::CliConfig;

#[derive(Debug, Args)]
pub struct PostArgs {
    #[command(subcommand)]
    pub command: PostCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// List all posts, newest first
    List,
    /// Show one post
    Get { id: i64 },
    /// Create a post
    Create(CreateArgs),
    /// Replace a post's title, content and position, archiving the old state
    Update(UpdateArgs),
    /// Delete a post and its history
    Delete { id: i64 },
    /// List a post's archived versions, newest first
    Versions { id: i64 },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub x: f64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub y: f64,

    /// Attributes as a JSON object
    #[arg(long)]
    pub attributes: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,

    /// Attributes as a JSON object; omitted keeps the current attributes
    #[arg(long)]
    pub attributes: Option<String>,
}

fn parse_attributes(raw: Option<&str>) -> Result<Option<Attributes>, ExError> {
    raw.map(|text| {
        Attributes::from_json_str(text).map_err(|e| ExError::from(e).with_op("parse_attributes"))
    })
    .transpose()
}

pub fn execute(args: PostArgs, config: &CliConfig) -> Result<(), ExError> {
    let mut conn = config.open_board()?;
    let ctx = request_context();

    match args.command {
        PostCommand::List => match apply_board_query(BoardQuery::PostList, &conn, &ctx)? {
            BoardQueryResult::Posts(posts) => print_json(&posts),
            other => Err(unexpected(&other)),
        },
        PostCommand::Get { id } => {
            match apply_board_query(BoardQuery::PostGet { post_id: id }, &conn, &ctx)? {
                BoardQueryResult::Post(post) => print_json(&post),
                other => Err(unexpected(&other)),
            }
        }
        PostCommand::Versions { id } => {
            match apply_board_query(BoardQuery::PostVersions { post_id: id }, &conn, &ctx)? {
                BoardQueryResult::Versions(versions) => print_json(&versions),
                other => Err(unexpected(&other)),
            }
        }
        PostCommand::Create(create) => {
            let mut input = NewPost::new(create.title, create.content)
                .with_position(Position::new(create.x, create.y));
            input.attributes = parse_attributes(create.attributes.as_deref())?;
            input.owner = create.owner;

            match apply_board_command(BoardCommand::PostCreate(input), &mut conn, &ctx)? {
                BoardCommandResult::PostCreated(post) => print_json(&post),
                other => Err(unexpected(&other)),
            }
        }
        PostCommand::Update(update) => {
            let mut change =
                PostUpdate::new(update.title, update.content, Position::new(update.x, update.y));
            change.attributes = parse_attributes(update.attributes.as_deref())?;

            let cmd = BoardCommand::PostUpdate {
                post_id: update.id,
                update: change,
            };
            match apply_board_command(cmd, &mut conn, &ctx)? {
                BoardCommandResult::PostUpdated(post) => print_json(&post),
                other => Err(unexpected(&other)),
            }
        }
        PostCommand::Delete { id } => {
            match apply_board_command(BoardCommand::PostDelete { post_id: id }, &mut conn, &ctx)? {
                BoardCommandResult::PostDeleted(deleted) => print_json(&deleted),
                other => Err(unexpected(&other)),
            }
        }
    }
}

fn unexpected(result: &impl std::fmt::Debug) -> ExError {
    ExError::new(canvas_core::ExErrorKind::Internal)
        .with_op("post")
        .with_message(format!("Unexpected engine result: {:?}", result))
}
