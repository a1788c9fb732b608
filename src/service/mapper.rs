//! Conversions between persisted entities and transfer objects.

use crate::models::{BookEntity, BookTo};

impl From<BookEntity> for BookTo {
    fn from(entity: BookEntity) -> Self {
        BookTo {
            id: entity.id,
            title: entity.title,
            authors: entity.authors,
            status: entity.status,
        }
    }
}

impl From<&BookEntity> for BookTo {
    fn from(entity: &BookEntity) -> Self {
        entity.clone().into()
    }
}

impl From<BookTo> for BookEntity {
    fn from(to: BookTo) -> Self {
        BookEntity {
            id: to.id,
            title: to.title,
            authors: to.authors,
            status: to.status,
        }
    }
}

/// Map a list of entities to transfer objects
pub fn map_to_transfer<I, E>(entities: I) -> Vec<BookTo>
where
    I: IntoIterator<Item = E>,
    E: Into<BookTo>,
{
    entities.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookStatus;

    #[test]
    fn test_entity_to_transfer_keeps_fields() {
        let entity = BookEntity::new(Some(3), "Lalka", "Bolesław Prus", BookStatus::Missing);
        let to: BookTo = (&entity).into();
        assert_eq!(to, BookTo::new(Some(3), "Lalka", "Bolesław Prus", BookStatus::Missing));

        let back: BookEntity = to.into();
        assert_eq!(back, entity);
    }

    #[test]
    fn test_map_list_keeps_order() {
        let entities = vec![
            BookEntity::new(Some(2), "B", "y", BookStatus::Free),
            BookEntity::new(Some(1), "A", "x", BookStatus::Loan),
        ];
        let ids: Vec<_> = map_to_transfer(&entities).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
    }
}
