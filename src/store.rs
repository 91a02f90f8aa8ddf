//! Persistent store access: idempotent seeding plus the read path shared by
//! the catalog and the reservation engine. All writes beyond seeding go
//! through the engine.

use crate::database::Database;
use crate::models::seat::{AVAILABLE, GRID_COLS, GRID_ROWS};
use crate::models::{Booking, Movie};
use tracing::info;

const SEED_MOVIES: &[(&str, &str, &str, &str, &str)] = &[
    ("The Matrix Reloaded", "Sci-Fi Action", "138 min", "19:00", "🎭"),
    ("Inception", "Sci-Fi Thriller", "148 min", "21:00", "🌀"),
];

/// Seeds the movie catalog and materializes every seat grid. Safe to call on
/// every startup: existing movies, seats, and bookings are left untouched.
pub async fn seed(db: &Database) -> Result<(), sqlx::Error> {
    let mut tx = db.pool.begin().await?;

    let movie_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(&mut *tx)
        .await?;

    if movie_count == 0 {
        for &(title, genre, duration, showtime, emoji) in SEED_MOVIES {
            sqlx::query(
                "INSERT INTO movies (title, genre, duration, showtime, poster_emoji)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(title)
            .bind(genre)
            .bind(duration)
            .bind(showtime)
            .bind(emoji)
            .execute(&mut *tx)
            .await?;
        }
        info!("Seeded {} movies", SEED_MOVIES.len());
    }

    // Materialize the full grid for every movie. OR IGNORE keeps this
    // idempotent and repairs a partially created grid without resetting
    // statuses of existing seats.
    let movie_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM movies")
        .fetch_all(&mut *tx)
        .await?;

    for &movie_id in &movie_ids {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                sqlx::query(
                    "INSERT OR IGNORE INTO seats (movie_id, row, col, status)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(movie_id)
                .bind(row)
                .bind(col)
                .bind(AVAILABLE)
                .execute(&mut *tx)
                .await?;
            }
        }
    }

    tx.commit().await?;
    info!(
        "Seat grids ready for {} movies ({}x{} each)",
        movie_ids.len(),
        GRID_ROWS,
        GRID_COLS
    );
    Ok(())
}

/// Full catalog in stable id order.
pub async fn movies(db: &Database) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        "SELECT id, title, genre, duration, showtime, poster_emoji
         FROM movies ORDER BY id",
    )
    .fetch_all(&db.pool)
    .await
}

pub async fn movie(db: &Database, movie_id: i64) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        "SELECT id, title, genre, duration, showtime, poster_emoji
         FROM movies WHERE id = ?1",
    )
    .bind(movie_id)
    .fetch_optional(&db.pool)
    .await
}

/// Seat status matrix for one movie. `None` means the movie is unknown; a
/// known movie always has the full grid, so the matrix is never ragged.
pub async fn seat_grid(db: &Database, movie_id: i64) -> Result<Option<Vec<Vec<i64>>>, sqlx::Error> {
    let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
        "SELECT row, col, status FROM seats WHERE movie_id = ?1 ORDER BY row, col",
    )
    .bind(movie_id)
    .fetch_all(&db.pool)
    .await?;

    if rows.is_empty() {
        return Ok(None);
    }

    let mut grid = vec![vec![AVAILABLE; GRID_COLS as usize]; GRID_ROWS as usize];
    for (row, col, status) in rows {
        grid[row as usize][col as usize] = status;
    }
    Ok(Some(grid))
}

/// Booking joined with its movie title. `None` covers both an unknown seat
/// and a seat that was never booked.
pub async fn booking_details(
    db: &Database,
    movie_id: i64,
    row: i64,
    col: i64,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT b.id, b.movie_id, m.title AS movie_title, b.row, b.col,
                b.customer_name, b.customer_email, b.customer_phone, b.booking_time
         FROM bookings b
         JOIN movies m ON m.id = b.movie_id
         WHERE b.movie_id = ?1 AND b.row = ?2 AND b.col = ?3",
    )
    .bind(movie_id)
    .bind(row)
    .bind(col)
    .fetch_optional(&db.pool)
    .await
}
