//! Inventory and equipment commands.

use std::io::{self, Read, Write};
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use super::args::{CatalogueCommand, CatalogueFieldChanges, CatalogueFields};
use super::notification::{Notification, SUCCESS_TITLE};
use super::render;
use super::shell::{CommandError, Handled, Shell};
use crate::domain::{
    Capability, CatalogueItem, CatalogueItemUpdate, CatalogueKind, Error, ImageUpload,
    MAX_IMAGE_BYTES, NewCatalogueItem,
};

const LOAD_FAILED: &str = "Не удалось загрузить каталог";

impl Shell {
    pub(super) async fn catalogue(
        &mut self,
        kind: CatalogueKind,
        command: CatalogueCommand,
        out: &mut dyn Write,
    ) -> Handled {
        match command {
            CatalogueCommand::List { search } => {
                let items = self
                    .ports
                    .catalogue
                    .list(kind)
                    .await
                    .map_err(CommandError::with_fallback(LOAD_FAILED))?;
                let shown = filter_items(items, search.as_deref());
                render::catalogue_rows(out, &shown)?;
                Ok(None)
            }
            CatalogueCommand::Show { id } => {
                let item = self
                    .ports
                    .catalogue
                    .get(kind, &id)
                    .await
                    .map_err(CommandError::with_fallback(LOAD_FAILED))?;
                render::catalogue_detail(out, &item)?;
                Ok(None)
            }
            CatalogueCommand::Create(fields) => self.create_item(kind, fields, out).await,
            CatalogueCommand::Update { id, fields } => self.update_item(kind, &id, fields).await,
            CatalogueCommand::Delete { id } => self.delete_item(kind, &id).await,
            CatalogueCommand::UploadImage { id, file } => {
                self.upload_image(kind, &id, &file).await
            }
            CatalogueCommand::DeleteImage { id, url } => {
                self.delete_image(kind, &id, &url).await
            }
        }
    }

    fn ensure_inventory_rights(&self) -> Result<(), CommandError> {
        if self.session.can(Capability::ManageInventory) {
            Ok(())
        } else {
            Err(Error::forbidden("Недостаточно прав для изменения каталога").into())
        }
    }

    async fn create_item(
        &self,
        kind: CatalogueKind,
        fields: CatalogueFields,
        out: &mut dyn Write,
    ) -> Handled {
        self.ensure_inventory_rights()?;
        let item = self
            .ports
            .catalogue
            .create(kind, &new_item(fields)?)
            .await
            .map_err(CommandError::with_fallback("Ошибка сохранения"))?;
        writeln!(out, "{}", item.id)?;
        Ok(Some(Notification::success("Предмет добавлен")))
    }

    async fn update_item(
        &self,
        kind: CatalogueKind,
        id: &str,
        fields: CatalogueFieldChanges,
    ) -> Handled {
        self.ensure_inventory_rights()?;
        let update = CatalogueItemUpdate {
            category: fields.category,
            name: fields.name,
            total_quantity: fields.total_quantity,
            visual_marker: fields.visual_marker,
            description: fields.description,
        };
        if update.is_empty() {
            return Err(Error::invalid_request("nothing to update").into());
        }
        self.ports
            .catalogue
            .update(kind, id, &update)
            .await
            .map_err(CommandError::with_fallback("Ошибка сохранения"))?;
        let title = match kind {
            CatalogueKind::Inventory => "Инвентарь обновлён",
            CatalogueKind::Equipment => "Оборудование обновлено",
        };
        Ok(Some(Notification::success(title)))
    }

    async fn delete_item(&self, kind: CatalogueKind, id: &str) -> Handled {
        self.ensure_inventory_rights()?;
        self.ports
            .catalogue
            .delete(kind, id)
            .await
            .map_err(CommandError::with_fallback("Не удалось удалить предмет"))?;
        Ok(Some(Notification::success("Предмет удалён")))
    }

    async fn upload_image(&self, kind: CatalogueKind, id: &str, file: &Path) -> Handled {
        self.ensure_inventory_rights()?;
        let upload = read_image(file)?;
        self.ports
            .catalogue
            .upload_image(kind, id, upload)
            .await
            .map_err(CommandError::with_fallback("Не удалось загрузить изображение"))?;
        Ok(Some(
            Notification::success(SUCCESS_TITLE).with_description("Изображение загружено"),
        ))
    }

    async fn delete_image(&self, kind: CatalogueKind, id: &str, url: &str) -> Handled {
        self.ensure_inventory_rights()?;
        self.ports
            .catalogue
            .delete_image(kind, id, url)
            .await
            .map_err(CommandError::with_fallback("Не удалось удалить изображение"))?;
        Ok(Some(
            Notification::success(SUCCESS_TITLE).with_description("Изображение удалено"),
        ))
    }
}

fn new_item(fields: CatalogueFields) -> Result<NewCatalogueItem, Error> {
    let category = fields.category.trim();
    let name = fields.name.trim();
    if category.is_empty() || name.is_empty() {
        return Err(Error::invalid_request("Заполните категорию и название"));
    }
    if fields.total_quantity < 0 {
        return Err(Error::invalid_request("Количество не может быть отрицательным"));
    }
    Ok(NewCatalogueItem {
        category: category.to_owned(),
        name: name.to_owned(),
        total_quantity: fields.total_quantity,
        visual_marker: fields.visual_marker,
        description: fields.description,
    })
}

/// Case-insensitive match on name, category, or description.
fn filter_items(items: Vec<CatalogueItem>, search: Option<&str>) -> Vec<CatalogueItem> {
    let Some(needle) = search
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase)
    else {
        return items;
    };
    items
        .into_iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

fn read_image(path: &Path) -> Result<ImageUpload, CommandError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::invalid_request(format!("{} is not a file", path.display())))?;
    let content_type =
        ImageUpload::content_type_for(file_name).unwrap_or("application/octet-stream");

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let bytes = read_capped(parent, file_name)
        .map_err(|err| Error::invalid_request(format!("{}: {err}", path.display())))?;
    ImageUpload::new(file_name, content_type, bytes)
        .map_err(|err| Error::invalid_request(err.to_string()).into())
}

/// Read at most one byte past the upload limit so oversize files are
/// rejected without loading them whole.
fn read_capped(parent: &Path, file_name: &str) -> io::Result<Vec<u8>> {
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    let file = directory.open(Path::new(file_name))?;
    let limit = u64::try_from(MAX_IMAGE_BYTES).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    //! Coverage for catalogue helpers that do not need a backend.
    use super::*;
    use crate::test_support::cap_fs::write_file;
    use rstest::rstest;
    use serde_json::json;

    fn item(name: &str, category: &str, description: Option<&str>) -> CatalogueItem {
        serde_json::from_value(json!({
            "id": name,
            "category": category,
            "name": name,
            "total_quantity": 1,
            "description": description,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .expect("item fixture")
    }

    #[rstest]
    #[case(None, 3)]
    #[case(Some("  "), 3)]
    #[case(Some("VASE"), 1)]
    #[case(Some("текстиль"), 1)]
    #[case(Some("white"), 1)]
    fn search_matches_name_category_or_description(
        #[case] search: Option<&str>,
        #[case] expected: usize,
    ) {
        let items = vec![
            item("Glass vase", "Вазы", None),
            item("Tablecloth", "Текстиль", None),
            item("Candle", "Декор", Some("White wax")),
        ];
        assert_eq!(filter_items(items, search).len(), expected);
    }

    #[rstest]
    fn images_are_read_with_a_guessed_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vase.PNG");
        write_file(&path, &[0x89, b'P', b'N', b'G']).expect("write");

        let upload = read_image(&path).expect("image reads");
        assert_eq!(upload.file_name(), "vase.PNG");
        assert_eq!(upload.content_type(), "image/png");
        assert_eq!(upload.bytes().len(), 4);
    }

    #[rstest]
    fn non_images_are_refused_before_upload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        write_file(&path, b"hello").expect("write");

        let err = read_image(&path).expect_err("not an image");
        assert!(matches!(
            err,
            CommandError::Failed { error, .. } if error.message().contains("notes.txt")
        ));
    }

    #[rstest]
    fn negative_quantities_are_rejected() {
        let fields = CatalogueFields {
            category: "Вазы".to_owned(),
            name: "Vase".to_owned(),
            total_quantity: -1,
            visual_marker: None,
            description: None,
        };
        assert!(new_item(fields).is_err());
    }
}
