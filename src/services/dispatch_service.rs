use std::collections::{HashMap, HashSet};

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::staff::CandidateRestaurant,
    entity::restaurant_menu_items::{Column as MenuCol, Entity as RestaurantMenuItems},
    entity::restaurants::Model as RestaurantModel,
    error::AppResult,
    geo,
    state::AppState,
};

/// Which restaurants currently carry each product, considering only
/// available menu items.
#[derive(Debug, Default)]
pub struct MenuIndex {
    by_product: HashMap<Uuid, HashSet<Uuid>>,
}

impl MenuIndex {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Uuid, Uuid)>) -> Self {
        let mut by_product: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for (product_id, restaurant_id) in pairs {
            by_product.entry(product_id).or_default().insert(restaurant_id);
        }
        Self { by_product }
    }

    /// Restaurants able to supply every product in the list: the
    /// intersection of the per-product availability sets. An order with
    /// no products, or with a product nobody carries, has no candidates.
    pub fn capable_restaurants(&self, product_ids: &[Uuid]) -> HashSet<Uuid> {
        let mut product_ids = product_ids.iter();
        let mut capable = match product_ids.next() {
            Some(id) => self.by_product.get(id).cloned().unwrap_or_default(),
            None => return HashSet::new(),
        };
        for id in product_ids {
            match self.by_product.get(id) {
                Some(set) => capable.retain(|r| set.contains(r)),
                None => return HashSet::new(),
            }
            if capable.is_empty() {
                break;
            }
        }
        capable
    }
}

pub async fn load_menu_index(orm: &OrmConn) -> AppResult<MenuIndex> {
    let items = RestaurantMenuItems::find()
        .filter(MenuCol::Availability.eq(true))
        .all(orm)
        .await?;
    Ok(MenuIndex::from_pairs(
        items.into_iter().map(|i| (i.product_id, i.restaurant_id)),
    ))
}

/// Attach geocoded distances from the delivery address and rank the
/// candidates: nearest first, unresolvable addresses last, ties broken
/// by restaurant name so the ordering is deterministic.
pub async fn rank_candidates(
    state: &AppState,
    delivery_address: &str,
    restaurants: Vec<&RestaurantModel>,
) -> AppResult<Vec<CandidateRestaurant>> {
    let mut candidates = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        let distance_km = geo::calculate_distance(
            &state.pool,
            &state.geocoder,
            delivery_address,
            &restaurant.address,
        )
        .await?;
        candidates.push(CandidateRestaurant {
            id: restaurant.id,
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            distance_km,
        });
    }

    sort_candidates(&mut candidates);
    Ok(candidates)
}

pub fn sort_candidates(candidates: &mut [CandidateRestaurant]) {
    candidates.sort_by(|a, b| {
        match (a.distance_km, b.distance_km) {
            (Some(da), Some(db)) => da
                .partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, distance_km: Option<f64>) -> CandidateRestaurant {
        CandidateRestaurant {
            id: Uuid::new_v4(),
            name: name.into(),
            address: format!("{name} street"),
            distance_km,
        }
    }

    #[test]
    fn capability_is_set_intersection() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let r3 = Uuid::new_v4();

        let index = MenuIndex::from_pairs([(p1, r1), (p1, r2), (p2, r2), (p2, r3)]);

        assert_eq!(index.capable_restaurants(&[p1]), HashSet::from([r1, r2]));
        assert_eq!(index.capable_restaurants(&[p1, p2]), HashSet::from([r2]));
    }

    #[test]
    fn unknown_product_yields_no_candidates() {
        let p1 = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let index = MenuIndex::from_pairs([(p1, r1)]);

        assert!(index.capable_restaurants(&[Uuid::new_v4()]).is_empty());
        assert!(index.capable_restaurants(&[p1, Uuid::new_v4()]).is_empty());
    }

    #[test]
    fn empty_order_has_no_candidates() {
        let index = MenuIndex::from_pairs([(Uuid::new_v4(), Uuid::new_v4())]);
        assert!(index.capable_restaurants(&[]).is_empty());
    }

    #[test]
    fn duplicate_products_do_not_change_the_result() {
        let p1 = Uuid::new_v4();
        let r1 = Uuid::new_v4();
        let index = MenuIndex::from_pairs([(p1, r1)]);
        assert_eq!(index.capable_restaurants(&[p1, p1]), HashSet::from([r1]));
    }

    #[test]
    fn candidates_sort_by_distance_then_name() {
        let mut candidates = vec![
            candidate("Zeta", Some(3.0)),
            candidate("Alpha", None),
            candidate("Mid", Some(1.5)),
            candidate("Beta", Some(1.5)),
        ];
        sort_candidates(&mut candidates);

        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Mid", "Zeta", "Alpha"]);
    }

    #[test]
    fn sorting_is_deterministic_for_equal_distances() {
        let mut first = vec![candidate("B", Some(2.0)), candidate("A", Some(2.0))];
        let mut second = vec![candidate("A", Some(2.0)), candidate("B", Some(2.0))];
        sort_candidates(&mut first);
        sort_candidates(&mut second);

        let names = |cs: &[CandidateRestaurant]| {
            cs.iter().map(|c| c.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }
}
