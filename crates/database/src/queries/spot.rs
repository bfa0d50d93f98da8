use model::{region::Region, spot::Spot, WithId};
use spots::database::{DatabaseError, RegionCandidate, RegionFilter, Result};
use sqlx::{postgres::PgArguments, query::QueryAs, Executor, Postgres};
use utility::id::Id;

use crate::data_model::{
    spot::{RegionCandidateRow, SpotRow},
    with_id, with_ids,
};

use super::convert_error;

/// Binds every content column of a spot as `$1` to `$22`, in table order.
fn bind_spot<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    spot: &'q Spot,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(&spot.name)
        .bind(spot.spot_type.code())
        .bind(&spot.road_address)
        .bind(&spot.lot_address)
        .bind(spot.latitude)
        .bind(spot.longitude)
        .bind(&spot.phone_number)
        .bind(spot.water_area)
        .bind(&spot.main_fish_species)
        .bind(spot.max_capacity)
        .bind(spot.water_facility_type.code())
        .bind(&spot.usage_fee)
        .bind(&spot.key_points)
        .bind(&spot.safety_facilities)
        .bind(&spot.convenience_facilities)
        .bind(&spot.nearby_attractions)
        .bind(&spot.management_phone)
        .bind(&spot.management_office)
        .bind(spot.data_reference_date)
        .bind(spot.region.map(|region| region.code()))
        .bind(spot.fishing_level_info)
        .bind(&spot.gubun)
}

pub async fn id_by_name<'c, E>(executor: E, name: &str) -> Result<Option<Id<Spot>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT id FROM spots WHERE name = $1 ORDER BY id ASC LIMIT 1;")
        .bind(name)
        .fetch_optional(executor)
        .await
        .map_err(|why| convert_error(why))
        .map(|id: Option<i64>| id.map(Id::new))
}

pub async fn get<'c, E>(executor: E, id: &Id<Spot>) -> Result<WithId<Spot>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, spot_type, road_address, lot_address, latitude,
            longitude, phone_number, water_area, main_fish_species,
            max_capacity, water_facility_type, usage_fee, key_points,
            safety_facilities, convenience_facilities, nearby_attractions,
            management_phone, management_office, data_reference_date,
            region, fishing_level_info, gubun
        FROM spots
        WHERE id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map_err(|why| convert_error(why))
    .map(|row: SpotRow| with_id(row))
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Spot>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, spot_type, road_address, lot_address, latitude,
            longitude, phone_number, water_area, main_fish_species,
            max_capacity, water_facility_type, usage_fee, key_points,
            safety_facilities, convenience_facilities, nearby_attractions,
            management_phone, management_office, data_reference_date,
            region, fishing_level_info, gubun
        FROM spots
        ORDER BY id ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(|why| convert_error(why))
    .map(|rows: Vec<SpotRow>| with_ids(rows))
}

pub async fn insert<'c, E>(executor: E, spot: &Spot) -> Result<Id<Spot>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = sqlx::query_as(
        "
        INSERT INTO spots(
            name, spot_type, road_address, lot_address, latitude,
            longitude, phone_number, water_area, main_fish_species,
            max_capacity, water_facility_type, usage_fee, key_points,
            safety_facilities, convenience_facilities, nearby_attractions,
            management_phone, management_office, data_reference_date,
            region, fishing_level_info, gubun
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
            $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22
        )
        RETURNING id;
        ",
    );
    bind_spot(query, spot)
        .fetch_one(executor)
        .await
        .map_err(|why| convert_error(why))
        .map(|(id,): (i64,)| Id::new(id))
}

/// Replaces every content column and touches `updated_at`.
pub async fn update<'c, E>(executor: E, id: &Id<Spot>, spot: &Spot) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = sqlx::query_as(
        "
        UPDATE spots SET
            name = $1,
            spot_type = $2,
            road_address = $3,
            lot_address = $4,
            latitude = $5,
            longitude = $6,
            phone_number = $7,
            water_area = $8,
            main_fish_species = $9,
            max_capacity = $10,
            water_facility_type = $11,
            usage_fee = $12,
            key_points = $13,
            safety_facilities = $14,
            convenience_facilities = $15,
            nearby_attractions = $16,
            management_phone = $17,
            management_office = $18,
            data_reference_date = $19,
            region = $20,
            fishing_level_info = $21,
            gubun = $22,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $23
        RETURNING id;
        ",
    );
    bind_spot(query, spot)
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(|why| convert_error(why))
        .map(|_: (i64,)| ())
}

pub async fn update_region<'c, E>(executor: E, id: &Id<Spot>, region: Region) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("UPDATE spots SET region = $1 WHERE id = $2;")
        .bind(region.code())
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(|why| convert_error(why))?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}

/// `char_length` counts characters, so two-character Korean codes pass.
pub async fn region_candidates<'c, E>(
    executor: E,
    filter: RegionFilter,
) -> Result<Vec<RegionCandidate>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = match filter {
        RegionFilter::Unresolved => sqlx::query_as::<Postgres, RegionCandidateRow>(
            "
            SELECT
                id, name, road_address, lot_address, latitude, longitude,
                region, fishing_level_info
            FROM spots
            WHERE region IS NULL
                OR region = ''
                OR char_length(region) > 2
            ORDER BY id ASC;
            ",
        ),
        RegionFilter::CoordinateUnresolved => sqlx::query_as::<Postgres, RegionCandidateRow>(
            "
            SELECT
                id, name, road_address, lot_address, latitude, longitude,
                region, fishing_level_info
            FROM spots
            WHERE fishing_level_info
                AND latitude IS NOT NULL
                AND longitude IS NOT NULL
                AND (region IS NULL OR region = '' OR region = $1)
            ORDER BY id ASC;
            ",
        )
        .bind(Region::Other.code()),
    };
    query
        .fetch_all(executor)
        .await
        .map_err(|why| convert_error(why))
        .map(|rows| {
            rows.into_iter()
                .map(|row| row.to_model())
                .collect::<Vec<_>>()
        })
}
