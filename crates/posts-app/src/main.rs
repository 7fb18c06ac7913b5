use clap::{Parser, Subcommand};
use posts_app::config::AppConfig;
use posts_app::lifecycle::{tracing::setup_tracing, PostsSystem};
use posts_app::model::Post;
use resource_sync::Snapshot;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "posts", version, about = "Browse and edit posts on a remote posts API")]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every post
    List,
    /// Fetch one post from the server
    Show { id: String },
    /// Create a post
    Add { title: String, content: String },
    /// Replace title and content of a post
    Update {
        id: String,
        title: String,
        content: String,
    },
    /// Delete a post
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let cli = Cli::parse();

    let system = PostsSystem::new(&cli.config)?;
    let posts = &system.posts;

    if let Command::Show { id } = &cli.command {
        print_post(&posts.fetch(id).await?);
        return Ok(());
    }

    let listing = posts.refresh().await?;
    if let Command::List = cli.command {
        print_posts(&listing);
        return Ok(());
    }

    // Mutations print the collection as the store publishes it.
    let subscription = posts.subscribe(|snapshot| {
        print_posts(snapshot);
        Ok(())
    });

    let result = match cli.command {
        Command::Add { title, content } => posts
            .add(&title, &content)
            .await
            .map(|post| info!(id = post.id.as_deref(), "Post created")),
        Command::Update { id, title, content } => posts
            .update(&id, &title, &content)
            .await
            .map(|_| info!(%id, "Post updated")),
        Command::Delete { id } => posts.delete(&id).await.map(|()| info!(%id, "Post deleted")),
        Command::List | Command::Show { .. } => Ok(()),
    };

    posts.unsubscribe(subscription);
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result?;
    Ok(())
}

fn print_posts(posts: &Snapshot<Post>) {
    if posts.is_empty() {
        println!("(no posts)");
    }
    for post in posts.iter() {
        print_post(post);
    }
}

fn print_post(post: &Post) {
    println!(
        "{}\t{}\t{}",
        post.id.as_deref().unwrap_or("-"),
        post.title,
        post.content
    );
}
