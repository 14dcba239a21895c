/*
 * Particle Life
 *
 * Particles of several groups attract and repel each other on a wrapping
 * plane according to a group x group interaction matrix. Simple pairwise
 * rules produce cells, worms and chasing clusters.
 *
 * Keyboard controls edit the physics while it runs; see the input module.
 */

use particle_life::app;

fn main() {
    env_logger::init();

    nannou::app(app::model).update(app::update).run();
}
