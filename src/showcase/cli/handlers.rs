//! Per-command handlers: turn parsed arguments into forms, call the API and
//! render the outcome. Handlers return the text to print; `run()` owns stdout.

use super::render::Renderer;
use super::setup::{
    CategoryFields, Commands, GalleryCommands, MenuCommands, PageCommands, PostCommands,
    ProfileCommands, ProfileFields, ProjectCommands, ProjectFields, TagCommands,
};
use showcase::api::ShowcaseApi;
use showcase::commands::gallery::GalleryFilter;
use showcase::commands::CmdResult;
use showcase::error::Result;
use showcase::forms::{
    CategoryForm, GalleryImageForm, MenuItemForm, PostForm, ProfileForm, ProjectForm, ReviewForm,
    SitePageForm, TagForm,
};
use showcase::store::RecordStore;

pub fn dispatch<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    command: Commands,
) -> Result<String> {
    match command {
        Commands::Projects(cmd) => handle_projects(api, out, cmd),
        Commands::Tags(cmd) => handle_tags(api, out, cmd),
        Commands::Profiles(cmd) => handle_profiles(api, out, cmd),
        Commands::Posts(cmd) => handle_posts(api, out, cmd),
        Commands::Menu(cmd) => handle_menu(api, out, cmd),
        Commands::Gallery(cmd) => handle_gallery(api, out, cmd),
        Commands::Pages(cmd) => handle_pages(api, out, cmd),
        Commands::Config => Ok(out.config(api.config())),
    }
}

fn messages(out: &Renderer, result: CmdResult) -> String {
    out.messages(&result.messages)
}

fn project_form(title: String, fields: ProjectFields) -> ProjectForm {
    ProjectForm {
        title,
        description: fields.description,
        featured_image: fields.featured_image,
        demo_link: fields.demo,
        source_link: fields.source,
        tags: fields.tags,
    }
}

fn profile_form(fields: ProfileFields) -> ProfileForm {
    ProfileForm {
        name: fields.name,
        email: fields.email,
        username: fields.username,
        bio: fields.bio,
        short_info: fields.short_info,
        profile_image: fields.image,
        social_github: fields.github,
        social_youtube: fields.youtube,
        social_website: fields.website,
    }
}

fn category_form(fields: CategoryFields) -> CategoryForm {
    CategoryForm {
        name: fields.name,
        slug: fields.slug,
        order: fields.order,
        is_active: !fields.inactive,
    }
}

fn handle_projects<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: ProjectCommands,
) -> Result<String> {
    match cmd {
        ProjectCommands::List(args) => {
            let listing = api.list_projects(args.query, args.page)?;
            Ok(out.projects(&listing))
        }
        ProjectCommands::View { id } => Ok(out.project(&api.view_project(&id)?)),
        ProjectCommands::Create {
            title,
            owner,
            fields,
        } => {
            let result = api.create_project(owner.as_deref(), project_form(title, fields))?;
            Ok(messages(out, result))
        }
        ProjectCommands::Update { id, title, fields } => {
            let result = api.update_project(&id, project_form(title, fields))?;
            Ok(messages(out, result))
        }
        ProjectCommands::Delete { id } => Ok(messages(out, api.delete_project(&id)?)),
        ProjectCommands::Vote {
            id,
            voter,
            value,
            body,
        } => {
            let result = api.vote(&id, &voter, ReviewForm { body, value })?;
            Ok(messages(out, result))
        }
        ProjectCommands::Reviews { id } => Ok(out.reviews(&api.project_reviews(&id)?)),
    }
}

fn handle_tags<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: TagCommands,
) -> Result<String> {
    match cmd {
        TagCommands::List => Ok(out.tags(&api.list_tags()?)),
        TagCommands::Create { name } => Ok(messages(out, api.create_tag(TagForm { name })?)),
        TagCommands::Delete { name } => Ok(messages(out, api.delete_tag(&name)?)),
    }
}

fn handle_profiles<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: ProfileCommands,
) -> Result<String> {
    match cmd {
        ProfileCommands::List(args) => {
            let listing = api.list_profiles(args.query, args.page)?;
            Ok(out.profiles(&listing))
        }
        ProfileCommands::View { id } => Ok(out.profile(&api.view_profile(&id)?)),
        ProfileCommands::Create(fields) => {
            Ok(messages(out, api.create_profile(profile_form(fields))?))
        }
        ProfileCommands::Update { id, fields } => {
            Ok(messages(out, api.update_profile(&id, profile_form(fields))?))
        }
        ProfileCommands::Delete { id } => Ok(messages(out, api.delete_profile(&id)?)),
    }
}

fn handle_posts<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: PostCommands,
) -> Result<String> {
    match cmd {
        PostCommands::List { listing, category } => {
            let listing = api.list_posts(category.as_deref(), listing.query, listing.page)?;
            Ok(out.posts(&listing))
        }
        PostCommands::View { slug } => Ok(out.post(&api.view_post(&slug)?)),
        PostCommands::Create {
            title,
            category,
            slug,
            content,
            photo,
            draft,
        } => {
            let form = PostForm {
                title,
                slug,
                content,
                photo,
                is_published: !draft,
                category,
            };
            Ok(messages(out, api.create_post(form)?))
        }
        PostCommands::Categories => Ok(out.blog_categories(&api.list_blog_categories()?)),
        PostCommands::AddCategory(fields) => {
            Ok(messages(out, api.create_blog_category(category_form(fields))?))
        }
        PostCommands::DeleteCategory { slug } => {
            Ok(messages(out, api.delete_blog_category(&slug)?))
        }
    }
}

fn handle_menu<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: MenuCommands,
) -> Result<String> {
    match cmd {
        MenuCommands::Show => Ok(out.menu(&api.menu()?)),
        MenuCommands::Dish { slug } => Ok(out.dish(&api.view_dish(&slug)?)),
        MenuCommands::AddCategory(fields) => {
            Ok(messages(out, api.create_menu_category(category_form(fields))?))
        }
        MenuCommands::AddItem {
            name,
            category,
            price,
            slug,
            description,
            image,
            inactive,
        } => {
            let form = MenuItemForm {
                category,
                name,
                slug,
                description,
                price,
                image,
                is_active: !inactive,
            };
            Ok(messages(out, api.create_menu_item(form)?))
        }
        MenuCommands::DeleteCategory { slug } => {
            Ok(messages(out, api.delete_menu_category(&slug)?))
        }
    }
}

fn handle_gallery<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: GalleryCommands,
) -> Result<String> {
    match cmd {
        GalleryCommands::List {
            category,
            featured,
            query,
        } => {
            let filter = GalleryFilter {
                category,
                featured_only: featured,
                query,
            };
            Ok(out.gallery(&api.gallery(&filter)?))
        }
        GalleryCommands::Categories => Ok(out.gallery_categories(&api.gallery_categories()?)),
        GalleryCommands::AddCategory(fields) => {
            Ok(messages(out, api.create_gallery_category(category_form(fields))?))
        }
        GalleryCommands::Add {
            image,
            title,
            category,
            description,
            featured,
        } => {
            let form = GalleryImageForm {
                category,
                title,
                image,
                description,
                is_featured: featured,
            };
            Ok(messages(out, api.add_gallery_image(form)?))
        }
        GalleryCommands::DeleteCategory { slug } => {
            Ok(messages(out, api.delete_gallery_category(&slug)?))
        }
    }
}

fn handle_pages<S: RecordStore>(
    api: &mut ShowcaseApi<S>,
    out: &Renderer,
    cmd: PageCommands,
) -> Result<String> {
    match cmd {
        PageCommands::List => Ok(out.pages(&api.list_pages()?)),
        PageCommands::Show { name } => Ok(out.page(&api.show_page(&name)?)),
        PageCommands::Set { name, title, about } => {
            let form = SitePageForm {
                page_name: name,
                title,
                about,
            };
            Ok(messages(out, api.set_page(form)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::setup::Cli;
    use clap::Parser;
    use showcase::config::ShowcaseConfig;
    use showcase::error::ShowcaseError;
    use showcase::store::memory::InMemoryStore;

    struct Harness {
        api: ShowcaseApi<InMemoryStore>,
        out: Renderer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                api: ShowcaseApi::new(InMemoryStore::new(), ShowcaseConfig::default()),
                out: Renderer::new(false).unwrap(),
            }
        }

        fn run(&mut self, args: &[&str]) -> Result<String> {
            let cli = Cli::try_parse_from(std::iter::once("showcase").chain(args.iter().copied()))
                .unwrap();
            dispatch(&mut self.api, &self.out, cli.command)
        }
    }

    #[test]
    fn create_then_list_projects() {
        let mut h = Harness::new();
        h.run(&["tags", "create", "rust"]).unwrap();
        let created = h
            .run(&["projects", "create", "Engine", "--tag", "rust"])
            .unwrap();
        assert!(created.contains("Engine"));

        let listing = h.run(&["projects", "list"]).unwrap();
        assert!(listing.contains("Engine"));
        assert!(listing.contains("#rust"));
        assert!(listing.contains("[1]"));
    }

    #[test]
    fn search_query_is_echoed() {
        let mut h = Harness::new();
        h.run(&["projects", "create", "Engine"]).unwrap();
        h.run(&["projects", "create", "Garden"]).unwrap();

        let listing = h.run(&["projects", "list", "-q", "gard"]).unwrap();
        assert!(listing.contains("Search: gard"));
        assert!(listing.contains("Garden"));
        assert!(!listing.contains("Engine"));
    }

    #[test]
    fn unknown_tag_is_a_validation_error() {
        let mut h = Harness::new();
        let result = h.run(&["projects", "create", "Engine", "--tag", "nope"]);
        assert!(matches!(result, Err(ShowcaseError::Validation(_))));
    }

    #[test]
    fn vote_reports_ratio() {
        let mut h = Harness::new();
        h.run(&["profiles", "create", "--name", "Ada", "--username", "ada"])
            .unwrap();
        h.run(&["projects", "create", "Engine"]).unwrap();

        let api = &h.api;
        let project = api.list_projects(None, None).unwrap().items[0].project.id;
        let voter = api.list_profiles(None, None).unwrap().items[0].id;

        let output = h
            .run(&[
                "projects",
                "vote",
                &project.to_string(),
                "--voter",
                &voter.to_string(),
                "--value",
                "up",
            ])
            .unwrap();
        assert!(output.contains("100% positive of 1 vote"));
    }

    #[test]
    fn drafts_are_hidden_from_the_blog() {
        let mut h = Harness::new();
        h.run(&["posts", "add-category", "News"]).unwrap();
        h.run(&["posts", "create", "Hello", "-c", "news"]).unwrap();
        h.run(&["posts", "create", "Secret", "-c", "news", "--draft"])
            .unwrap();

        let listing = h.run(&["posts", "list"]).unwrap();
        assert!(listing.contains("Hello"));
        assert!(!listing.contains("Secret"));
        assert!(h.run(&["posts", "view", "secret"]).is_err());
        assert!(h.run(&["posts", "view", "hello"]).unwrap().contains("News"));
    }

    #[test]
    fn menu_shows_active_dishes() {
        let mut h = Harness::new();
        h.run(&["menu", "add-category", "Breakfast"]).unwrap();
        h.run(&["menu", "add-item", "Pancakes", "-c", "breakfast", "--price", "6.5"])
            .unwrap();
        h.run(&[
            "menu",
            "add-item",
            "Waffles",
            "-c",
            "breakfast",
            "--price",
            "7",
            "--inactive",
        ])
        .unwrap();

        let menu = h.run(&["menu", "show"]).unwrap();
        assert!(menu.contains("Pancakes"));
        assert!(menu.contains("6.50"));
        assert!(!menu.contains("Waffles"));
    }

    #[test]
    fn bad_price_is_rejected() {
        let mut h = Harness::new();
        h.run(&["menu", "add-category", "Breakfast"]).unwrap();
        let result = h.run(&["menu", "add-item", "Toast", "-c", "breakfast", "--price", "cheap"]);
        assert!(matches!(result, Err(ShowcaseError::Validation(_))));
    }

    #[test]
    fn pages_are_upserted() {
        let mut h = Harness::new();
        let first = h
            .run(&["pages", "set", "about", "--title", "About", "--about", "Hi"])
            .unwrap();
        let second = h
            .run(&["pages", "set", "about", "--title", "About us", "--about", "Hello"])
            .unwrap();
        assert!(first.contains("Created page"));
        assert!(second.contains("Updated page"));
        assert!(h.run(&["pages", "show", "about"]).unwrap().contains("Hello"));
    }

    #[test]
    fn gallery_filters_featured() {
        let mut h = Harness::new();
        h.run(&["gallery", "add", "a.jpg", "--title", "Terrace", "--featured"])
            .unwrap();
        h.run(&["gallery", "add", "b.jpg", "--title", "Kitchen"])
            .unwrap();

        let output = h.run(&["gallery", "list", "--featured"]).unwrap();
        assert!(output.contains("Terrace"));
        assert!(!output.contains("Kitchen"));
    }

    #[test]
    fn config_shows_page_size() {
        let mut h = Harness::new();
        assert!(h.run(&["config"]).unwrap().contains("page_size"));
    }
}
