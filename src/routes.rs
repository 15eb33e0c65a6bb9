//! Client-side navigation surface: typed routes and their hrefs.

use crate::model::{EntityKind, RecordId};
use crate::schema::Catalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    List(EntityKind),
    Form {
        kind: EntityKind,
        id: Option<RecordId>,
        edit: bool,
    },
    QuotationTransform {
        id: RecordId,
    },
}

impl Route {
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List(kind) => format!("/{}-list", kind.route_base()),
            Route::Form { kind, id: None, .. } => format!("/{}", kind.route_base()),
            Route::Form {
                kind,
                id: Some(id),
                edit: false,
            } => format!("/{}/{}", kind.route_base(), id),
            Route::Form {
                kind,
                id: Some(id),
                edit: true,
            } => format!("/{}/{}?editMode=true", kind.route_base(), id),
            Route::QuotationTransform { id } => format!("/quotation-transform/{id}"),
        }
    }

    /// Parse an app path back into a route. Id segments follow each entity's
    /// id kind; unknown paths yield `None`. Only `editMode=true` switches an
    /// existing record's form into edit mode.
    pub fn parse(path: &str, catalog: &Catalog) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let edit = query
            .map(|q| q.split('&').any(|kv| kv == "editMode=true"))
            .unwrap_or(false);

        if path == "/" {
            return Some(Route::Home);
        }
        let mut segments = path.strip_prefix('/')?.split('/');
        let head = segments.next()?;
        let tail = segments.next();
        if head.is_empty() || segments.next().is_some() {
            return None;
        }

        if head == "quotation-transform" {
            let id_kind = catalog.entity(EntityKind::Quotation)?.id_kind;
            let id = RecordId::parse(tail?, id_kind).ok()?;
            return Some(Route::QuotationTransform { id });
        }
        if let Some(base) = head.strip_suffix("-list") {
            if tail.is_none() {
                if let Some(kind) = EntityKind::from_route_base(base) {
                    return Some(Route::List(kind));
                }
            }
        }
        let kind = EntityKind::from_route_base(head)?;
        match tail {
            None => Some(Route::Form {
                kind,
                id: None,
                edit: false,
            }),
            Some(raw) => {
                let id_kind = catalog.entity(kind)?.id_kind;
                let id = RecordId::parse(raw, id_kind).ok()?;
                Some(Route::Form {
                    kind,
                    id: Some(id),
                    edit,
                })
            }
        }
    }
}
