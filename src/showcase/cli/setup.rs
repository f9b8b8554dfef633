use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.3.2"
/// Format for dev builds: "v0.3.2 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SHOWCASE_GIT_HASH");
    const IS_RELEASE: &str = env!("SHOWCASE_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    bin_name = "showcase",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Developer projects, a blog and a restaurant site from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the data files
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Records per listing page
    #[arg(long, global = true, value_name = "N", help_heading = "Options")]
    pub page_size: Option<usize>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Developer projects and votes
    #[command(subcommand, display_order = 1)]
    Projects(ProjectCommands),

    /// Project tags
    #[command(subcommand, display_order = 2)]
    Tags(TagCommands),

    /// Developer profiles
    #[command(subcommand, display_order = 3)]
    Profiles(ProfileCommands),

    /// Blog posts and categories
    #[command(subcommand, display_order = 4)]
    Posts(PostCommands),

    /// Restaurant menu
    #[command(subcommand, display_order = 5)]
    Menu(MenuCommands),

    /// Restaurant photo gallery
    #[command(subcommand, display_order = 6)]
    Gallery(GalleryCommands),

    /// Static site pages
    #[command(subcommand, display_order = 7)]
    Pages(PageCommands),

    /// Show the effective configuration
    #[command(display_order = 8)]
    Config,
}

/// Search and page selection shared by every paginated listing.
#[derive(Args, Debug, Clone, Default)]
pub struct ListingArgs {
    /// Search term
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Page number
    #[arg(short, long)]
    pub page: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectFields {
    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Featured image path
    #[arg(long)]
    pub featured_image: Option<String>,

    /// Live demo URL
    #[arg(long)]
    pub demo: Option<String>,

    /// Source code URL
    #[arg(long)]
    pub source: Option<String>,

    /// Tag name (repeatable)
    #[arg(long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects, best rated first
    #[command(alias = "ls")]
    List(ListingArgs),

    /// Show a project with its reviews
    #[command(alias = "v")]
    View { id: String },

    /// Add a project
    Create {
        title: String,

        /// Owner profile id
        #[arg(long)]
        owner: Option<String>,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Replace a project's details
    Update {
        id: String,

        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Delete a project and its reviews
    #[command(alias = "rm")]
    Delete { id: String },

    /// Vote on a project
    Vote {
        id: String,

        /// Voting profile id
        #[arg(long)]
        voter: String,

        /// up or down
        #[arg(long)]
        value: String,

        /// Optional comment
        #[arg(long)]
        body: Option<String>,
    },

    /// List a project's reviews
    Reviews { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags with usage counts
    #[command(alias = "ls")]
    List,

    /// Add a tag
    Create { name: String },

    /// Delete a tag and detach it from projects
    #[command(alias = "rm")]
    Delete { name: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    /// One-line headline
    #[arg(long)]
    pub short_info: Option<String>,

    /// Profile image path
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub github: Option<String>,

    #[arg(long)]
    pub youtube: Option<String>,

    #[arg(long)]
    pub website: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List profiles
    #[command(alias = "ls")]
    List(ListingArgs),

    /// Show a profile and its projects
    #[command(alias = "v")]
    View { id: String },

    /// Add a profile
    Create(ProfileFields),

    /// Replace a profile's details
    Update {
        id: String,

        #[command(flatten)]
        fields: ProfileFields,
    },

    /// Delete a profile; its projects are kept without owner
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CategoryFields {
    pub name: String,

    /// Explicit slug, generated from the name when omitted
    #[arg(long)]
    pub slug: Option<String>,

    /// Position in listings
    #[arg(long, default_value_t = 0)]
    pub order: u32,

    /// Hide the category
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List published posts, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        listing: ListingArgs,

        /// Only posts in this category (slug)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a post by slug
    #[command(alias = "v")]
    View { slug: String },

    /// Write a post
    Create {
        title: String,

        /// Category slug
        #[arg(short, long)]
        category: String,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long, default_value = "")]
        content: String,

        /// Photo path
        #[arg(long)]
        photo: Option<String>,

        /// Save without publishing
        #[arg(long)]
        draft: bool,
    },

    /// List categories
    Categories,

    /// Add a category
    AddCategory(CategoryFields),

    /// Delete a category without posts
    DeleteCategory { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// Show the menu
    Show,

    /// Show one dish by slug
    Dish { slug: String },

    /// Add a menu category
    AddCategory(CategoryFields),

    /// Add a dish
    AddItem {
        name: String,

        /// Category slug
        #[arg(short, long)]
        category: String,

        /// Price, e.g. 12.50
        #[arg(long)]
        price: String,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        /// Image path
        #[arg(long)]
        image: Option<String>,

        /// Hide the dish
        #[arg(long)]
        inactive: bool,
    },

    /// Delete a category with all its dishes
    DeleteCategory { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum GalleryCommands {
    /// List photos, newest first
    #[command(alias = "ls")]
    List {
        /// Only photos in this category (slug)
        #[arg(short, long)]
        category: Option<String>,

        /// Only featured photos
        #[arg(long)]
        featured: bool,

        /// Search term
        #[arg(short = 'q', long)]
        query: Option<String>,
    },

    /// List active categories
    Categories,

    /// Add a gallery category
    AddCategory(CategoryFields),

    /// Add a photo
    Add {
        /// Image path
        image: String,

        #[arg(long, default_value = "")]
        title: String,

        /// Category slug
        #[arg(short, long)]
        category: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        featured: bool,
    },

    /// Delete a category; its photos are kept
    DeleteCategory { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// List pages
    #[command(alias = "ls")]
    List,

    /// Show a page by name
    Show { name: String },

    /// Create or replace a page
    Set {
        name: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        about: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("showcase").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn global_flags_work_after_subcommands() {
        let cli = parse(&["projects", "list", "-q", "rust", "--page-size", "5", "-vv"]);
        assert_eq!(cli.page_size, Some(5));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Projects(ProjectCommands::List(args)) => {
                assert_eq!(args.query.as_deref(), Some("rust"));
                assert_eq!(args.page, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn page_is_kept_raw() {
        let cli = parse(&["profiles", "ls", "--page", "abc"]);
        match cli.command {
            Commands::Profiles(ProfileCommands::List(args)) => {
                assert_eq!(args.page.as_deref(), Some("abc"))
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn repeatable_tags() {
        let cli = parse(&["projects", "create", "Engine", "--tag", "rust", "--tag", "cli"]);
        match cli.command {
            Commands::Projects(ProjectCommands::Create { title, fields, .. }) => {
                assert_eq!(title, "Engine");
                assert_eq!(fields.tags, vec!["rust", "cli"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn vote_requires_voter_and_value() {
        let result = Cli::try_parse_from(["showcase", "projects", "vote", "abcd1234"]);
        assert!(result.is_err());
    }
}
