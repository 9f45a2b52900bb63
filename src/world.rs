//! Level geometry built from a generated labyrinth.
//!
//! A [`World`] holds the entities of one level: the floor and ceiling slabs, one wall block per
//! solid cell and the exit marker. Positions use world units on the floor plane, where `x` follows
//! the grid columns and `z` the grid rows; elevations grow upwards from the floor surface.

use std::collections::BTreeMap;

use glam::DVec2;
use rand::{seq::IndexedRandom as _, Rng};
use tracing::debug;

use crate::generator::{cell_to_world, Cell, Grid, CELL_SIZE, WALL_HEIGHT};

/// Thickness of the floor, the ceiling and the exit marker.
const SLAB_THICKNESS: f64 = 0.1;

/// Kinds of entities making up a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntityType {
    /// Solid wall block.
    Wall,
    /// Floor slab under the whole labyrinth.
    Floor,
    /// Ceiling slab over the whole labyrinth.
    Ceiling,
    /// Exit marker lying on the floor.
    Exit,
}

/// Surface texture of a wall block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WallTexture {
    /// Rough stone blocks.
    Stone,
    /// Brick masonry.
    Brick,
}

impl WallTexture {
    /// Every texture a wall can be given.
    pub(crate) const ALL: [Self; 2] = [Self::Stone, Self::Brick];
}

/// Axis-aligned rectangle on the floor plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Aabb {
    /// Corner with the smallest coordinates.
    pub(crate) min: DVec2,
    /// Corner with the largest coordinates.
    pub(crate) max: DVec2,
}

impl Aabb {
    /// Builds a box centred on `center` spanning `size` along each axis.
    pub(crate) fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;

        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Centre of the box.
    pub(crate) fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    /// Returns whether both boxes overlap. Boxes that only share an edge do not.
    pub(crate) fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Piece of level geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Entity {
    /// What the entity is.
    pub(crate) kind: EntityType,
    /// Area covered on the floor plane.
    pub(crate) footprint: Aabb,
    /// Elevation of the bottom face.
    pub(crate) elevation: f64,
    /// Vertical extent.
    pub(crate) height: f64,
    /// Texture of wall blocks.
    pub(crate) texture: Option<WallTexture>,
    /// Grid cell the entity was built from, for walls and the exit.
    pub(crate) cell: Option<(usize, usize)>,
}

impl Entity {
    /// Elevation of the top face.
    pub(crate) const fn top(&self) -> f64 {
        self.elevation + self.height
    }

    /// Builds a slab covering the grid plus a margin of one cell on each side.
    fn slab(kind: EntityType, grid: &Grid, elevation: f64) -> Self {
        let origin = DVec2::splat(-CELL_SIZE);
        let far = cell_to_world(grid.width() + 1, grid.height() + 1);

        Self {
            kind,
            footprint: Aabb {
                min: origin,
                max: far,
            },
            elevation,
            height: SLAB_THICKNESS,
            texture: None,
            cell: None,
        }
    }

    /// Builds a one-cell entity standing on the floor at the given grid cell.
    fn block(kind: EntityType, (x, z): (usize, usize), height: f64) -> Self {
        Self {
            kind,
            footprint: Aabb::from_center(cell_to_world(x, z), DVec2::splat(CELL_SIZE)),
            elevation: 0.0,
            height,
            texture: None,
            cell: Some((x, z)),
        }
    }
}

/// Collection of the entities making up the current level.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct World {
    /// Every entity of the level, in build order.
    entities: Vec<Entity>,
    /// Texture of every wall block, by grid cell.
    textures: BTreeMap<(usize, usize), WallTexture>,
}

impl World {
    /// Builds the level geometry for `grid`.
    ///
    /// Each wall block picks one of the [`WallTexture`]s at random.
    pub(crate) fn build<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let mut entities = vec![
            Entity::slab(EntityType::Floor, grid, -SLAB_THICKNESS),
            Entity::slab(EntityType::Ceiling, grid, WALL_HEIGHT),
        ];
        let mut textures = BTreeMap::new();

        for (coords, cell) in grid.iter() {
            match cell {
                Cell::Wall => {
                    let mut wall = Entity::block(EntityType::Wall, coords, WALL_HEIGHT);
                    wall.texture = WallTexture::ALL.choose(rng).copied();
                    if let Some(texture) = wall.texture {
                        let _ = textures.insert(coords, texture);
                    }
                    entities.push(wall);
                }
                Cell::Exit => {
                    entities.push(Entity::block(EntityType::Exit, coords, SLAB_THICKNESS));
                }
                Cell::Path | Cell::Start => {}
            }
        }

        let world = Self { entities, textures };
        debug!(
            walls = world.entities_of(EntityType::Wall).count(),
            "built level geometry"
        );

        world
    }

    /// Texture of the wall block standing on `cell`, if there is one.
    pub(crate) fn wall_texture_at(&self, cell: (usize, usize)) -> Option<WallTexture> {
        self.textures.get(&cell).copied()
    }

    /// Iterates over the entities of the given kind.
    pub(crate) fn entities_of(&self, kind: EntityType) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .iter()
            .filter(move |entity| entity.kind == kind)
    }

    /// Returns whether `area` overlaps any wall block.
    pub(crate) fn collides(&self, area: &Aabb) -> bool {
        self.entities_of(EntityType::Wall)
            .any(|wall| wall.footprint.intersects(area))
    }

    /// Elevation of the walkable floor surface; zero when the level has no floor.
    pub(crate) fn floor_height(&self) -> f64 {
        self.entities_of(EntityType::Floor)
            .map(Entity::top)
            .reduce(f64::max)
            .unwrap_or_default()
    }

    /// Elevation of the underside of the ceiling, or `None` when the level has no ceiling.
    pub(crate) fn ceiling_height(&self) -> Option<f64> {
        self.entities_of(EntityType::Ceiling)
            .map(|ceiling| ceiling.elevation)
            .reduce(f64::min)
    }

    /// Exit marker of the level.
    pub(crate) fn exit(&self) -> Option<&Entity> {
        self.entities_of(EntityType::Exit).next()
    }
}
