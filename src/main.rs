use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use kimia_realty::catalog::FilterCriteria;
use kimia_realty::config;
use kimia_realty::forms::{self, BlogForm, PropertyForm};
use kimia_realty::models::{BlogCategory, PropertyStatus, PropertyType};
use kimia_realty::render;
use kimia_realty::views::{AdminPanel, AdminTab, BlogPage, LoginPage, PropertiesPage};
use kimia_realty::{App, View};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kimia", version, about = "Kimia RealEstate listings, blog and admin client")]
struct Cli {
    /// Configuration file (defaults to kimia.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base address
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Landing page
    Home,
    /// Browse the catalog
    Properties(FilterArgs),
    /// Show one listing
    Property { id: String },
    /// Browse published articles
    Blog {
        #[arg(long)]
        category: Option<BlogCategory>,
    },
    /// Read one article
    Post { id: String },
    /// Sign in as admin
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show whether an admin session is stored
    Status,
    /// Manage listings and posts
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long = "type")]
    property_type: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            search: args.search,
            property_type: args.property_type,
            location: args.location,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// List every property
    Properties,
    /// List every post, drafts included
    Posts,
    CreateProperty(PropertyArgs),
    UpdateProperty {
        id: String,
        #[command(flatten)]
        fields: PropertyArgs,
    },
    DeleteProperty { id: String },
    CreatePost(PostArgs),
    UpdatePost {
        id: String,
        #[command(flatten)]
        fields: PostArgs,
    },
    DeletePost { id: String },
    /// Upload an image file and print the stored reference
    UploadImage { path: PathBuf },
}

#[derive(Debug, Args)]
struct PropertyArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long = "type")]
    property_type: Option<PropertyType>,
    #[arg(long)]
    status: Option<PropertyStatus>,
    /// Comma-separated
    #[arg(long)]
    features: Option<String>,
    /// Image file to embed; repeatable
    #[arg(long = "image")]
    images: Vec<PathBuf>,
    /// Position of an existing image to drop; repeatable
    #[arg(long = "remove-image")]
    remove_images: Vec<usize>,
}

impl PropertyArgs {
    fn apply(self, form: &mut PropertyForm) -> anyhow::Result<()> {
        let PropertyArgs {
            title,
            description,
            price,
            location,
            bedrooms,
            bathrooms,
            area,
            property_type,
            status,
            features,
            images,
            mut remove_images,
        } = self;

        overwrite(&mut form.title, title);
        overwrite(&mut form.description, description);
        overwrite(&mut form.price, price);
        overwrite(&mut form.location, location);
        overwrite(&mut form.bedrooms, bedrooms);
        overwrite(&mut form.bathrooms, bathrooms);
        overwrite(&mut form.area, area);
        overwrite(&mut form.features, features);
        if let Some(property_type) = property_type {
            form.property_type = property_type;
        }
        if let Some(status) = status {
            form.status = status;
        }

        // Highest first so earlier removals don't shift later indices.
        remove_images.sort_unstable_by(|a, b| b.cmp(a));
        remove_images.dedup();
        for index in remove_images {
            form.remove_image(index)?;
        }
        for path in &images {
            form.add_image_file(path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct PostArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    excerpt: Option<String>,
    #[arg(long)]
    category: Option<BlogCategory>,
    #[arg(long)]
    published: Option<bool>,
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long, conflicts_with = "image")]
    clear_image: bool,
}

impl PostArgs {
    fn apply(self, form: &mut BlogForm) -> anyhow::Result<()> {
        overwrite(&mut form.title, self.title);
        overwrite(&mut form.content, self.content);
        overwrite(&mut form.excerpt, self.excerpt);
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(published) = self.published {
            form.published = published;
        }
        if self.clear_image {
            form.clear_image();
        }
        if let Some(path) = &self.image {
            form.set_image_file(path)?;
        }
        Ok(())
    }
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }

    let mut app = App::from_config(settings)?;
    run(&mut app, cli.command).await
}

async fn run(app: &mut App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Home => {
            app.navigate(View::Home);
            println!("{}\n\n{}", app.navbar(), render::home());
        }
        Command::Properties(filters) => {
            app.navigate(View::Properties);
            println!("{}\n", app.navbar());

            let mut page = PropertiesPage::new();
            page.set_criteria(filters.into());
            page.refresh(app.api()).await;
            info!(
                shown = page.visible().len(),
                total = page.catalog().source().len(),
                "catalog filtered"
            );
            println!("{}", render::property_list(page.visible(), page.is_loading()));
        }
        Command::Property { id } => {
            app.navigate(View::Properties);
            println!("{}\n", app.navbar());

            let mut page = PropertiesPage::new();
            page.refresh(app.api()).await;
            let found = page
                .open(&id, app.api())
                .await
                .with_context(|| format!("Failed to load property {id}"))?;
            let property = if found { page.selected().cloned() } else { None };
            match property {
                Some(property) => println!("{}", render::property_detail(&property)),
                None => bail!("property {id} not found"),
            }
        }
        Command::Blog { category } => {
            app.navigate(View::Blog);
            println!("{}\n", app.navbar());

            let mut page = BlogPage::new();
            page.set_category(category);
            page.refresh(app.api()).await;
            println!("{}", render::blog_list(page.posts(), page.is_loading()));
        }
        Command::Post { id } => {
            app.navigate(View::Blog);
            println!("{}\n", app.navbar());

            let mut page = BlogPage::new();
            page.refresh(app.api()).await;
            let found = page
                .open(&id, app.api())
                .await
                .with_context(|| format!("Failed to load blog post {id}"))?;
            let post = if found { page.selected().cloned() } else { None };
            match post {
                Some(post) => println!("{}", render::blog_detail(&post)),
                None => bail!("blog post {id} not found"),
            }
        }
        Command::Login { username, password } => {
            app.navigate(View::Login);
            let mut page = LoginPage::with_credentials(username, password);
            let (api, session) = app.parts();
            if !page.submit(api, session).await {
                bail!("{}", page.error().unwrap_or("Login failed"));
            }
            app.navigate(View::Admin);
            println!("{}\n\nSigned in.", app.navbar());
        }
        Command::Logout => {
            app.session.logout()?;
            app.navigate(View::Home);
            println!("{}\n\nSigned out.", app.navbar());
        }
        Command::Status => {
            let state = if app.session.is_authenticated() {
                "signed in"
            } else {
                "signed out"
            };
            println!("{state} ({})", app.config.api.base_url);
        }
        Command::Admin(command) => {
            app.navigate(View::Admin);
            println!("{}\n", app.navbar());
            if !app.session.is_authenticated() {
                bail!("admin commands need a session; run `kimia login` first");
            }
            admin(app, command).await?;
        }
    }
    Ok(())
}

async fn admin(app: &mut App, command: AdminCommand) -> anyhow::Result<()> {
    let mut panel = AdminPanel::new();
    let (api, session) = app.parts();

    match command {
        AdminCommand::Properties => {
            panel.select_tab(AdminTab::Properties, api, session).await;
            println!("{}", render::admin_property_table(panel.properties()));
        }
        AdminCommand::Posts => {
            panel.select_tab(AdminTab::Blog, api, session).await;
            println!("{}", render::admin_blog_table(panel.posts()));
        }
        AdminCommand::CreateProperty(fields) => {
            panel.open_property_form(None);
            if let Some(form) = panel.property_form_mut() {
                fields.apply(form)?;
            }
            if !panel.submit_property_form(api, session).await {
                bail!("property was not saved");
            }
            println!("{}", render::admin_property_table(panel.properties()));
        }
        AdminCommand::UpdateProperty { id, fields } => {
            panel.select_tab(AdminTab::Properties, api, session).await;
            if !panel.open_property_form(Some(&id)) {
                bail!("property {id} not found");
            }
            if let Some(form) = panel.property_form_mut() {
                fields.apply(form)?;
            }
            if !panel.submit_property_form(api, session).await {
                bail!("property {id} was not saved");
            }
            println!("{}", render::admin_property_table(panel.properties()));
        }
        AdminCommand::DeleteProperty { id } => {
            if !panel.delete_property(&id, api, session).await {
                bail!("property {id} was not deleted");
            }
            println!("Deleted property {id}.");
        }
        AdminCommand::CreatePost(fields) => {
            panel.select_tab(AdminTab::Blog, api, session).await;
            panel.open_blog_form(None);
            if let Some(form) = panel.blog_form_mut() {
                fields.apply(form)?;
            }
            if !panel.submit_blog_form(api, session).await {
                bail!("blog post was not saved");
            }
            println!("{}", render::admin_blog_table(panel.posts()));
        }
        AdminCommand::UpdatePost { id, fields } => {
            panel.select_tab(AdminTab::Blog, api, session).await;
            if !panel.open_blog_form(Some(&id)) {
                bail!("blog post {id} not found");
            }
            if let Some(form) = panel.blog_form_mut() {
                fields.apply(form)?;
            }
            if !panel.submit_blog_form(api, session).await {
                bail!("blog post {id} was not saved");
            }
            println!("{}", render::admin_blog_table(panel.posts()));
        }
        AdminCommand::DeletePost { id } => {
            if !panel.delete_post(&id, api, session).await {
                bail!("blog post {id} was not deleted");
            }
            println!("Deleted blog post {id}.");
        }
        AdminCommand::UploadImage { path } => {
            let data_uri = forms::read_image(&path)?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image")
                .to_string();
            match panel.upload_image(&filename, data_uri, api, session).await {
                Some(uploaded) => println!(
                    "{} -> {}",
                    uploaded.filename,
                    render::describe_image(&uploaded.image_url)
                ),
                None => bail!("image {} was not uploaded", path.display()),
            }
        }
    }
    Ok(())
}
