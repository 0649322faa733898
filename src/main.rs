use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::keyboard::{self, key};
use iced::widget::{container, image::Handle};
use iced::{alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::{info, warn};
use walkdir::WalkDir;

mod api;
mod config;
mod media;
mod state;
mod ui;

use api::dto::MediaUpload;
use api::{ApiError, GalleryApi};
use config::AppConfig;
use state::albums::group_into_albums;
use state::data::{MediaItem, MediaKind, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use state::lightbox::{Lightbox, Origin};
use state::view::{paginate, GalleryView};
use ui::forms::MediaForm;
use ui::gallery::GridContext;
use ui::toast::{Toasts, TOAST_TTL};

/// Result of a folder import operation
#[derive(Debug, Clone)]
struct ImportResult {
    imported_count: usize,
    skipped_count: usize,
}

/// What the open confirmation dialog is about to delete
#[derive(Debug, Clone)]
pub enum DeleteTarget {
    /// One media record
    Item { id: String },
    /// Every member of an album, as a sequential batch
    Album { title: String, ids: Vec<String> },
}

/// Main application state
struct GalleryAdmin {
    /// Loaded configuration (base URL, token, page size)
    config: AppConfig,
    /// REST client, cloned into background tasks
    api: GalleryApi,
    /// The flat media list, always a server snapshot
    items: Vec<MediaItem>,
    /// Live category titles for pills and the form picker
    categories: Vec<String>,
    /// Filter, search and page cursor
    view_model: GalleryView,
    /// Album/lightbox navigation state
    lightbox: Lightbox,
    /// Thumbnail handles by media id
    thumbnails: HashMap<String, Handle>,
    /// Thumbnail fetches currently in flight
    pending_thumbnails: HashSet<String>,
    /// Active toast stack
    toasts: Toasts,
    /// List fetch in flight
    loading: bool,
    /// Mutation in flight; submit and confirm buttons are disabled
    busy: bool,
    /// Open add/edit form, if any
    form: Option<MediaForm>,
    /// Open delete confirmation, if any
    confirm: Option<DeleteTarget>,
    /// Close the form once the refetch after a save lands
    close_form_on_reload: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The media list fetch finished
    GalleryLoaded(Result<Vec<MediaItem>, ApiError>),
    /// The category fetch finished
    CategoriesLoaded(Result<Vec<String>, ApiError>),
    /// User asked for a fresh list
    Refresh,

    // Browsing
    ToggleCategory(String),
    ClearCategories,
    SearchChanged(String),
    GoToPage(usize),

    // Navigation
    OpenAlbum(String),
    /// Open the lightbox on a grid single, addressed by id
    OpenMedia(String),
    /// Open the lightbox on a member of the open album
    OpenAlbumItem(usize),
    NextItem,
    PrevItem,
    CloseOverlay,

    /// A thumbnail fetch finished for the given media id
    ThumbnailLoaded(String, Result<Handle, ApiError>),

    // Add/edit form
    OpenCreateForm,
    OpenEditForm,
    FormNameChanged(String),
    FormCategoryPicked(String),
    FormAlbumChanged(String),
    FormTagsChanged(String),
    FormDateChanged(String),
    FormPickFile,
    FormSubmit,
    FormCancel,
    MediaSaved(Result<(), ApiError>),

    // Deletion
    RequestDeleteItem,
    RequestDeleteAlbum,
    ConfirmDelete,
    CancelDelete,
    MediaDeleted(Result<(), ApiError>),
    AlbumDeleted(Result<(), ApiError>),

    // Folder import
    ImportFolder,
    ImportComplete(ImportResult),

    // Toasts
    ToastExpired(usize),
    DismissToast(usize),
}

impl GalleryAdmin {
    /// Create a new instance of the application and kick off the initial
    /// gallery and category fetches.
    fn new() -> (Self, Task<Message>) {
        let config = config::load();
        let api = GalleryApi::new(&config);

        info!("gallery-admin starting against {}", config.base_url);

        let app = GalleryAdmin {
            config,
            api: api.clone(),
            items: Vec::new(),
            categories: Vec::new(),
            view_model: GalleryView::default(),
            lightbox: Lightbox::default(),
            thumbnails: HashMap::new(),
            pending_thumbnails: HashSet::new(),
            toasts: Toasts::default(),
            loading: true,
            busy: false,
            form: None,
            confirm: None,
            close_form_on_reload: false,
        };

        let gallery = {
            let api = api.clone();
            Task::perform(
                async move { api.fetch_gallery().await },
                Message::GalleryLoaded,
            )
        };
        let categories = Task::perform(
            async move { api.fetch_categories("gallery").await },
            Message::CategoriesLoaded,
        );

        (app, Task::batch([gallery, categories]))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GalleryLoaded(Ok(items)) => {
                self.loading = false;
                self.busy = false;
                self.items = items;
                if self.close_form_on_reload {
                    self.form = None;
                    self.close_form_on_reload = false;
                }
                self.reconcile_lightbox();
                self.request_missing_thumbnails()
            }
            Message::GalleryLoaded(Err(error)) => {
                self.loading = false;
                self.busy = false;
                self.close_form_on_reload = false;
                self.surface_error("gallery fetch", &error)
            }
            Message::CategoriesLoaded(Ok(categories)) => {
                self.categories = categories;
                Task::none()
            }
            Message::CategoriesLoaded(Err(error)) => {
                self.surface_error("category fetch", &error)
            }
            Message::Refresh => {
                let api = self.api.clone();
                let categories = Task::perform(
                    async move { api.fetch_categories("gallery").await },
                    Message::CategoriesLoaded,
                );
                Task::batch([self.refetch(), categories])
            }

            Message::ToggleCategory(category) => {
                self.view_model.toggle_category(&category);
                Task::none()
            }
            Message::ClearCategories => {
                self.view_model.clear_categories();
                Task::none()
            }
            Message::SearchChanged(term) => {
                self.view_model.set_search(term);
                Task::none()
            }
            Message::GoToPage(page) => {
                self.view_model.go_to_page(page);
                Task::none()
            }

            Message::OpenAlbum(title) => {
                let member_count = {
                    let page_items = self.page_items();
                    group_into_albums(&page_items)
                        .album(&title)
                        .map(|album| album.items.len())
                        .unwrap_or(0)
                };
                self.lightbox.open_album(&title, member_count);
                Task::none()
            }
            Message::OpenMedia(id) => {
                let (position, len) = {
                    let visible = self.view_model.visible(&self.items);
                    (
                        visible.iter().position(|item| item.id == id),
                        visible.len(),
                    )
                };
                if let Some(position) = position {
                    self.lightbox.open_item(position, len);
                }
                Task::none()
            }
            Message::OpenAlbumItem(index) => {
                let len = if let Lightbox::AlbumOpen { title } = &self.lightbox {
                    let title = title.clone();
                    let page_items = self.page_items();
                    group_into_albums(&page_items)
                        .album(&title)
                        .map(|album| album.items.len())
                        .unwrap_or(0)
                } else {
                    0
                };
                if len > 0 {
                    self.lightbox.open_item(index, len);
                }
                Task::none()
            }
            Message::NextItem => {
                let origin = match &self.lightbox {
                    Lightbox::ItemOpen { origin, .. } => Some(origin.clone()),
                    _ => None,
                };
                if let Some(origin) = origin {
                    let len = self.scoped_list(&origin).len();
                    self.lightbox.next(len);
                }
                Task::none()
            }
            Message::PrevItem => {
                self.lightbox.prev();
                Task::none()
            }
            Message::CloseOverlay => {
                self.lightbox.close();
                Task::none()
            }

            Message::ThumbnailLoaded(id, result) => {
                self.pending_thumbnails.remove(&id);
                match result {
                    Ok(handle) => {
                        self.thumbnails.insert(id, handle);
                    }
                    Err(error) => {
                        // The tile keeps its placeholder; the grid stays usable
                        warn!("preview for {id} failed: {error}");
                    }
                }
                Task::none()
            }

            Message::OpenCreateForm => {
                self.form = Some(MediaForm::create());
                Task::none()
            }
            Message::OpenEditForm => {
                let form = if let Lightbox::ItemOpen { origin, index } = &self.lightbox {
                    let origin = origin.clone();
                    let index = *index;
                    self.scoped_list(&origin)
                        .get(index)
                        .map(|item| MediaForm::edit(item))
                } else {
                    None
                };
                if form.is_some() {
                    self.form = form;
                }
                Task::none()
            }
            Message::FormNameChanged(value) => {
                if let Some(form) = &mut self.form {
                    form.name = value;
                }
                Task::none()
            }
            Message::FormCategoryPicked(category) => {
                if let Some(form) = &mut self.form {
                    form.category = Some(category);
                }
                Task::none()
            }
            Message::FormAlbumChanged(value) => {
                if let Some(form) = &mut self.form {
                    form.album_title = value;
                }
                Task::none()
            }
            Message::FormTagsChanged(value) => {
                if let Some(form) = &mut self.form {
                    form.tags = value;
                }
                Task::none()
            }
            Message::FormDateChanged(value) => {
                if let Some(form) = &mut self.form {
                    form.date = value;
                }
                Task::none()
            }
            Message::FormPickFile => {
                if let Some(form) = &mut self.form {
                    let mut extensions: Vec<&str> = Vec::new();
                    extensions.extend_from_slice(IMAGE_EXTENSIONS);
                    extensions.extend_from_slice(VIDEO_EXTENSIONS);

                    if let Some(path) = FileDialog::new()
                        .set_title("Select a media file")
                        .add_filter("Media", &extensions)
                        .pick_file()
                    {
                        form.file = Some(path);
                    }
                }
                Task::none()
            }
            Message::FormSubmit => {
                if self.busy {
                    return Task::none();
                }
                let Some(form) = &mut self.form else {
                    return Task::none();
                };
                match form.to_upload() {
                    Err(error) => {
                        form.error = Some(error);
                        Task::none()
                    }
                    Ok(upload) => {
                        form.error = None;
                        let api = self.api.clone();
                        match (form.id.clone(), form.file.clone()) {
                            (Some(id), _) => {
                                self.busy = true;
                                Task::perform(
                                    async move { api.update_media(&id, &upload).await },
                                    Message::MediaSaved,
                                )
                            }
                            (None, Some(file)) => {
                                self.busy = true;
                                Task::perform(
                                    async move { api.create_media(&upload, file).await },
                                    Message::MediaSaved,
                                )
                            }
                            // Unreachable: validation requires a file on create
                            (None, None) => Task::none(),
                        }
                    }
                }
            }
            Message::FormCancel => {
                if !self.busy {
                    self.form = None;
                }
                Task::none()
            }
            Message::MediaSaved(Ok(())) => {
                self.close_form_on_reload = true;
                let toast = self.toast_success("Media saved.");
                Task::batch([toast, self.refetch()])
            }
            Message::MediaSaved(Err(error)) => {
                self.busy = false;
                self.surface_error("save media", &error)
            }

            Message::RequestDeleteItem => {
                let id = if let Lightbox::ItemOpen { origin, index } = &self.lightbox {
                    let origin = origin.clone();
                    let index = *index;
                    self.scoped_list(&origin)
                        .get(index)
                        .map(|item| item.id.clone())
                } else {
                    None
                };
                if let Some(id) = id {
                    self.confirm = Some(DeleteTarget::Item { id });
                }
                Task::none()
            }
            Message::RequestDeleteAlbum => {
                let target = if let Lightbox::AlbumOpen { title } = &self.lightbox {
                    let title = title.clone();
                    let page_items = self.page_items();
                    group_into_albums(&page_items).album(&title).map(|album| {
                        DeleteTarget::Album {
                            title: title.clone(),
                            ids: album.items.iter().map(|item| item.id.clone()).collect(),
                        }
                    })
                } else {
                    None
                };
                if target.is_some() {
                    self.confirm = target;
                }
                Task::none()
            }
            Message::ConfirmDelete => {
                if self.busy {
                    return Task::none();
                }
                let Some(target) = self.confirm.clone() else {
                    return Task::none();
                };
                self.busy = true;
                let api = self.api.clone();
                match target {
                    DeleteTarget::Item { id } => Task::perform(
                        async move { api.delete_media(&id).await },
                        Message::MediaDeleted,
                    ),
                    DeleteTarget::Album { ids, .. } => Task::perform(
                        async move { api.delete_all(&ids).await },
                        Message::AlbumDeleted,
                    ),
                }
            }
            Message::CancelDelete => {
                if !self.busy {
                    self.confirm = None;
                }
                Task::none()
            }
            Message::MediaDeleted(Ok(())) => {
                self.confirm = None;
                let toast = self.toast_success("Media deleted.");
                Task::batch([toast, self.refetch()])
            }
            Message::MediaDeleted(Err(error)) => {
                // The lightbox keeps its position; nothing was removed
                self.confirm = None;
                self.busy = false;
                self.surface_error("delete media", &error)
            }
            Message::AlbumDeleted(Ok(())) => {
                self.confirm = None;
                self.lightbox.close_all();
                let toast = self.toast_success("Album deleted.");
                Task::batch([toast, self.refetch()])
            }
            Message::AlbumDeleted(Err(error)) => {
                self.confirm = None;
                self.busy = false;
                self.surface_error("delete album", &error)
            }

            Message::ImportFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Media Files")
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.busy = true;
                    let api = self.api.clone();
                    return Task::perform(
                        import_folder_async(api, folder_path),
                        Message::ImportComplete,
                    );
                }
                Task::none()
            }
            Message::ImportComplete(result) => {
                let toast = self.toast_success(format!(
                    "Import complete: {} uploaded, {} skipped.",
                    result.imported_count, result.skipped_count
                ));
                Task::batch([toast, self.refetch()])
            }

            Message::ToastExpired(id) | Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let visible = self.view_model.visible(&self.items);
        let page = paginate(
            &visible,
            self.view_model.pagination.current_page,
            self.config.page_size,
        );
        let page_items = page.items.to_vec();

        let mut screen: Element<Message> = ui::gallery::view(GridContext {
            grouped: group_into_albums(&page_items),
            page: page.page,
            total_pages: page.total_pages,
            total_visible: visible.len(),
            categories: &self.categories,
            view_model: &self.view_model,
            thumbnails: &self.thumbnails,
            loading: self.loading,
            busy: self.busy,
        });

        match &self.lightbox {
            Lightbox::Closed => {}
            Lightbox::AlbumOpen { title } => {
                let grouped = group_into_albums(&page_items);
                if let Some(album) = grouped.album(title) {
                    screen = ui::modal(
                        screen,
                        ui::viewer::album_view(album, &self.thumbnails, self.busy),
                        Message::CloseOverlay,
                    );
                }
            }
            Lightbox::ItemOpen { origin, index } => {
                let list = self.scoped_list(origin);
                if let Some(item) = list.get(*index).copied() {
                    screen = ui::modal(
                        screen,
                        ui::viewer::item_view(
                            item,
                            *index,
                            list.len(),
                            &self.thumbnails,
                            self.busy,
                        ),
                        Message::CloseOverlay,
                    );
                }
            }
        }

        if let Some(form) = &self.form {
            screen = ui::modal(
                screen,
                ui::forms::view(form, &self.categories, self.busy),
                Message::FormCancel,
            );
        }

        if let Some(target) = &self.confirm {
            screen = ui::modal(
                screen,
                ui::viewer::confirm_view(target, self.busy),
                Message::CancelDelete,
            );
        }

        if !self.toasts.is_empty() {
            let overlay = container(ui::toast::view(&self.toasts))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Top)
                .padding(16);
            screen = iced::widget::stack![screen, overlay].into();
        }

        screen
    }

    /// Global keyboard shortcuts, attached only while an overlay is open
    /// and dropped again the moment the lightbox closes.
    fn subscription(&self) -> Subscription<Message> {
        if self.lightbox.is_closed() {
            return Subscription::none();
        }

        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            keyboard::Key::Named(key::Named::ArrowLeft) => Some(Message::PrevItem),
            keyboard::Key::Named(key::Named::ArrowRight) => Some(Message::NextItem),
            keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseOverlay),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Fetch a fresh media list from the backend.
    fn refetch(&mut self) -> Task<Message> {
        self.loading = true;
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_gallery().await },
            Message::GalleryLoaded,
        )
    }

    /// The items on the current page of the filtered list.
    fn page_items(&self) -> Vec<&MediaItem> {
        let visible = self.view_model.visible(&self.items);
        paginate(
            &visible,
            self.view_model.pagination.current_page,
            self.config.page_size,
        )
        .items
        .to_vec()
    }

    /// The media list an open lightbox is addressed against: the full
    /// filtered list for grid items, the member list for album items.
    fn scoped_list(&self, origin: &Origin) -> Vec<&MediaItem> {
        match origin {
            Origin::Grid => self.view_model.visible(&self.items),
            Origin::Album(title) => {
                let page_items = self.page_items();
                group_into_albums(&page_items)
                    .album(title)
                    .map(|album| album.items.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Re-anchor the navigation state after the list was replaced by a
    /// refetch: close views whose album projection dissolved, clamp the
    /// focused index into the shrunken list.
    fn reconcile_lightbox(&mut self) {
        match self.lightbox.clone() {
            Lightbox::Closed => {}
            Lightbox::AlbumOpen { title } => {
                let gone = {
                    let page_items = self.page_items();
                    group_into_albums(&page_items).album(&title).is_none()
                };
                if gone {
                    self.lightbox.close_all();
                }
            }
            Lightbox::ItemOpen { origin, .. } => {
                if let Origin::Album(title) = &origin {
                    let gone = {
                        let page_items = self.page_items();
                        group_into_albums(&page_items).album(title).is_none()
                    };
                    if gone {
                        self.lightbox.close_all();
                        return;
                    }
                }
                let len = self.scoped_list(&origin).len();
                self.lightbox.item_removed(len);
            }
        }
    }

    /// Queue thumbnail fetches for every image without one.
    fn request_missing_thumbnails(&mut self) -> Task<Message> {
        let wanted: Vec<(String, String)> = self
            .items
            .iter()
            .filter(|item| {
                item.kind == MediaKind::Image
                    && !self.thumbnails.contains_key(&item.id)
                    && !self.pending_thumbnails.contains(&item.id)
            })
            .map(|item| (item.id.clone(), item.file.clone()))
            .collect();

        let mut tasks = Vec::new();
        for (id, file) in wanted {
            self.pending_thumbnails.insert(id.clone());
            let api = self.api.clone();
            let message_id = id.clone();
            tasks.push(Task::perform(
                media::thumbnail::load(api, id, file),
                move |result| Message::ThumbnailLoaded(message_id.clone(), result),
            ));
        }

        Task::batch(tasks)
    }

    fn toast_success(&mut self, message: impl Into<String>) -> Task<Message> {
        let id = self.toasts.success(message);
        expire_toast(id)
    }

    /// Log the failure and put its user-facing text on the toast stack.
    fn surface_error(&mut self, context: &str, error: &ApiError) -> Task<Message> {
        warn!("{context}: {error}");
        let id = self.toasts.error(error.notification());
        expire_toast(id)
    }
}

/// Schedule the auto-dismiss for a freshly pushed toast.
fn expire_toast(id: usize) -> Task<Message> {
    Task::perform(tokio::time::sleep(TOAST_TTL), move |_| {
        Message::ToastExpired(id)
    })
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gallery_admin=info")),
        )
        .init();

    iced::application(
        "Gallery Admin",
        GalleryAdmin::update,
        GalleryAdmin::view,
    )
    .theme(GalleryAdmin::theme)
    .subscription(GalleryAdmin::subscription)
    .centered()
    .run_with(GalleryAdmin::new)
}

/// Async function to upload every media file found in a folder
/// Runs in the background so the UI stays responsive during large imports
async fn import_folder_async(api: GalleryApi, folder_path: PathBuf) -> ImportResult {
    let mut imported_count = 0;
    let mut skipped_count = 0;

    info!("scanning folder {}", folder_path.display());

    // Walk the directory tree recursively
    for entry in WalkDir::new(&folder_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Only process files (not directories)
        if !path.is_file() {
            continue;
        }

        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        // Only known media extensions are uploadable
        if MediaKind::from_extension(&filename).is_none() {
            skipped_count += 1;
            continue;
        }

        let name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let upload = MediaUpload {
            name,
            ..MediaUpload::default()
        };

        match api.create_media(&upload, path.to_path_buf()).await {
            Ok(()) => {
                imported_count += 1;
                if imported_count % 25 == 0 {
                    info!("uploaded {imported_count} files...");
                }
            }
            Err(error) => {
                warn!("upload of {filename} failed: {error}");
                skipped_count += 1;
            }
        }
    }

    info!("import complete: {imported_count} uploaded, {skipped_count} skipped");

    ImportResult {
        imported_count,
        skipped_count,
    }
}
